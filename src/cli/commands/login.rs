use std::time::Duration;

use crate::adapters::stores::pastebin_store::PastebinStore;
use crate::cli::output;
use crate::config::app_config::{self, AppConfig};
use crate::core::errors::Result;
use crate::core::models::paste::{DEFAULT_PASTEBIN_URL, PasteConfig};

/// Execute the `sshare login` command.
///
/// Pastes created with a user key belong to the account instead of
/// being anonymous.
pub fn execute(
    username: &str,
    password: &str,
    token: Option<&str>,
    url: Option<&str>,
    config: &AppConfig,
    timeout: Duration,
) -> Result<()> {
    let section = &config.pastebin;
    let token = token.or(section.dev_token.as_deref()).unwrap_or_default();
    let url = url.or(section.url.as_deref()).unwrap_or(DEFAULT_PASTEBIN_URL);

    let store = PastebinStore::new(PasteConfig::new(url, token)?)?.with_timeout(timeout);

    let sp = output::spinner(&format!("Logging in as {username}..."));
    let user_key = match store.generate_user_key(username, password) {
        Ok(key) => {
            output::finish_spinner(sp, "Pastebin user key generated");
            key
        }
        Err(e) => {
            output::abandon_spinner(sp);
            return Err(e);
        }
    };

    println!("\n  {user_key}\n");
    let location = app_config::default_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "your config file".into());
    output::info(&format!(
        "Pass it with --pastebin-user-key or set user_key under [pastebin] in {location}"
    ));
    Ok(())
}
