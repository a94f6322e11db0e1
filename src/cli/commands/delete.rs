use std::time::Duration;

use crate::cli::StoreArgs;
use crate::cli::commands::share;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;

/// Execute the `sshare delete` command.
///
/// The store is selected the same way as for sharing. Only stores that hand
/// out a delete token support this; the others fail with an unsupported
/// operation error before any request is sent.
pub fn execute(
    locator: &str,
    credential: &str,
    store_args: &StoreArgs,
    config: &AppConfig,
    timeout: Duration,
) -> Result<()> {
    let store = share::build_store(store_args, config, timeout)?;

    output::detail(&format!("Deleting {locator}"));
    let sp = output::spinner(&format!("Deleting from {}...", store.name()));
    match store.delete(locator, credential) {
        Ok(()) => {
            output::finish_spinner(sp, &format!("Deleted {locator}"));
            Ok(())
        }
        Err(e) => {
            output::abandon_spinner(sp);
            Err(e)
        }
    }
}
