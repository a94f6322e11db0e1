use std::time::Duration;

use colored::Colorize;

use crate::adapters::prompt::terminal_selector::AllKeysSelector;
use crate::cli::SourceArgs;
use crate::cli::commands::sources;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::share_service::ShareService;

/// Execute the `sshare list` command.
///
/// Reads the same sources as a share but prints what was found instead
/// of prompting and uploading.
pub fn execute(args: &SourceArgs, timeout: Duration) -> Result<()> {
    output::header("sshare — Available SSH keys");

    let mut service = ShareService::new(AllKeysSelector);
    sources::collect_keys(args, timeout, &mut service)?;

    let keys = service.keys();
    if keys.is_empty() {
        output::warning("No keys found");
        return Ok(());
    }

    println!();
    for (i, key) in keys.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            key.name().bold(),
            format!("({})", key.key_type()).dimmed()
        );
        println!("     {}", key.fingerprint());
    }
    println!();
    output::success(&format!("{} key(s) found", keys.len()));
    Ok(())
}
