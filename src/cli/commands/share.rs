use std::time::Duration;

use crate::adapters::stores::pastebin_store::PastebinStore;
use crate::adapters::stores::transfer_store::{DEFAULT_TRANSFER_URL, TransferStore};
use crate::cli::commands::sources;
use crate::cli::output;
use crate::cli::{SourceArgs, StoreArgs};
use crate::config::app_config::{AppConfig, StoreKind, validate_retention};
use crate::core::errors::Result;
use crate::core::models::paste::{DEFAULT_PASTEBIN_URL, ExpiryTime, PasteConfig, Visibility};
use crate::core::models::upload::{Publication, UploadConfig};
use crate::core::services::share_service::ShareService;
use crate::core::traits::remote_store::RemoteStore;

/// Execute the default `sshare` action.
///
/// The store is configured and validated first, so a bad URL or option
/// fails before any key source is touched. Then keys are collected,
/// rendered and uploaded in one go.
pub fn execute(
    sources_args: &SourceArgs,
    store_args: &StoreArgs,
    config: &AppConfig,
    timeout: Duration,
) -> Result<()> {
    let store = build_store(store_args, config, timeout)?;

    output::header("sshare — Sharing SSH keys");
    let mut service = ShareService::new(sources::selector(sources_args));
    sources::collect_keys(sources_args, timeout, &mut service)?;

    let body = service.authorized_keys()?;
    output::success(&format!("{} key(s) selected", service.keys().len()));
    if output::is_verbose() {
        output::header("Generated authorized_keys");
        for line in body.lines() {
            output::detail(line);
        }
    }

    let sp = output::spinner(&format!("Uploading to {}...", store.name()));
    let publication = match service.publish(store.as_ref()) {
        Ok(publication) => {
            output::finish_spinner(sp, &format!("Uploaded to {}", store.name()));
            publication
        }
        Err(e) => {
            output::abandon_spinner(sp);
            return Err(e);
        }
    };

    print_publication(&publication);
    Ok(())
}

/// Build the configured store. Command-line values win over the config file.
pub fn build_store(
    args: &StoreArgs,
    config: &AppConfig,
    timeout: Duration,
) -> Result<Box<dyn RemoteStore>> {
    let kind = args.store.or(config.defaults.store).unwrap_or_default();
    match kind {
        StoreKind::Transfer => build_transfer_store(args, config, timeout)
            .map(|s| Box::new(s) as Box<dyn RemoteStore>),
        StoreKind::Pastebin => build_pastebin_store(args, config, timeout)
            .map(|s| Box::new(s) as Box<dyn RemoteStore>),
    }
}

fn build_transfer_store(
    args: &StoreArgs,
    config: &AppConfig,
    timeout: Duration,
) -> Result<TransferStore> {
    let section = &config.transfer;
    let defaults = UploadConfig::default();

    let max_downloads = args
        .max_downloads
        .or(section.max_downloads)
        .unwrap_or(defaults.max_downloads);
    let max_days = args.max_days.or(section.max_days).unwrap_or(defaults.max_days);
    validate_retention(max_downloads, max_days)?;

    let mut upload = defaults
        .with_max_downloads(max_downloads)
        .with_max_days(max_days);
    if let Some(filename) = args.filename.as_ref().or(section.filename.as_ref()) {
        upload = upload.with_filename(filename.as_str());
    }
    if let Some(password) = &args.password {
        upload = upload.with_password(password.as_str());
    }

    let url = args
        .url
        .as_deref()
        .or(section.url.as_deref())
        .unwrap_or(DEFAULT_TRANSFER_URL);
    Ok(TransferStore::new(url)?
        .with_config(upload)
        .with_timeout(timeout))
}

fn build_pastebin_store(
    args: &StoreArgs,
    config: &AppConfig,
    timeout: Duration,
) -> Result<PastebinStore> {
    let section = &config.pastebin;

    let expiry: ExpiryTime = match args.expiry.as_ref().or(section.expiry.as_ref()) {
        Some(value) => value.parse()?,
        None => ExpiryTime::OneDay,
    };
    let visibility: Visibility = match args.visibility.as_ref().or(section.visibility.as_ref()) {
        Some(value) => value.parse()?,
        None => Visibility::Unlisted,
    };

    let url = args
        .url
        .as_deref()
        .or(section.url.as_deref())
        .unwrap_or(DEFAULT_PASTEBIN_URL);
    let token = args
        .pastebin_token
        .as_deref()
        .or(section.dev_token.as_deref())
        .unwrap_or_default();

    let mut paste = PasteConfig::new(url, token)?;
    if let Some(user_key) = args.pastebin_user_key.as_ref().or(section.user_key.as_ref()) {
        paste = paste.with_user_key(user_key.as_str());
    }
    if let Some(folder) = args.pastebin_folder.as_ref().or(section.folder_key.as_ref()) {
        paste = paste.with_folder_key(folder.as_str());
    }

    Ok(PastebinStore::new(paste)?
        .with_paste_options(expiry, visibility)?
        .with_timeout(timeout))
}

fn print_publication(publication: &Publication) {
    println!();
    output::success(&format!("Download URL: {}", publication.locator));
    if let Some(raw) = &publication.raw_locator {
        output::success(&format!("Raw URL: {raw}"));
    }
    if let Some(credential) = &publication.delete_credential {
        output::info(&format!("Delete token: {credential}"));
        println!(
            "\n  Delete early with: sshare delete {} {credential}",
            publication.locator
        );
    }

    let fetch_url = publication
        .raw_locator
        .as_deref()
        .unwrap_or(&publication.locator);
    println!("  Install with: curl -sSL {fetch_url} >> ~/.ssh/authorized_keys");
}
