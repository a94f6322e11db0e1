use std::time::Duration;

use crate::adapters::agent::ssh_agent::AgentKeySource;
use crate::adapters::prompt::terminal_selector::{AllKeysSelector, TerminalSelector};
use crate::adapters::sources::github_source::GitHubKeySource;
use crate::adapters::sources::local_source::LocalKeySource;
use crate::cli::SourceArgs;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::share_service::ShareService;
use crate::core::traits::key_source::KeySource;
use crate::core::traits::selector::KeySelector;

/// Prompt on the terminal unless `--all` was given.
pub fn selector(args: &SourceArgs) -> Box<dyn KeySelector> {
    if args.all {
        Box::new(AllKeysSelector)
    } else {
        Box::new(TerminalSelector)
    }
}

/// Read every configured source into `service`, in a fixed order:
/// files and raw keys, GitHub, then the SSH agent.
pub fn collect_keys<S: KeySelector>(
    args: &SourceArgs,
    timeout: Duration,
    service: &mut ShareService<S>,
) -> Result<()> {
    let mut local = LocalKeySource::new(args.key_files.clone(), args.keys.clone());
    if !local.is_empty() {
        output::info("Adding keys from files and arguments...");
        collect(service, &mut local)?;
    }

    if let Some(token) = non_empty(args.github_token.as_deref()) {
        output::info("Adding keys from GitHub...");
        let mut github = GitHubKeySource::new(token)?.with_timeout(timeout);
        collect(service, &mut github)?;
    }

    if args.no_agent {
        return Ok(());
    }
    match args.agent.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => {
            output::info("Adding keys from SSH agent...");
            output::detail(&format!("Agent socket: {}", path.display()));
            let passphrase = non_empty(args.passphrase.as_deref()).map(str::to_string);
            let mut agent = AgentKeySource::new(path, passphrase);
            collect(service, &mut agent)?;
        }
        None => output::warning("No SSH agent path has been provided. Skipping..."),
    }

    Ok(())
}

fn collect<S: KeySelector>(service: &mut ShareService<S>, source: &mut dyn KeySource) -> Result<()> {
    let added = service.collect_from(source)?;
    output::detail(&format!("{added} key(s) taken from {}", source.name()));
    for warning in service.take_warnings() {
        output::warning(&warning.to_string());
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
