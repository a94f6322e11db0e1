mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};
use config::app_config::AppConfig;

fn main() {
    let args = Cli::parse();
    cli::output::set_verbose(args.verbose);

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> core::errors::Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let timeout = config.timeout(args.timeout)?;

    match &args.command {
        None => cli::commands::share::execute(&args.sources, &args.store, &config, timeout),
        Some(Commands::List { sources }) => cli::commands::list::execute(sources, timeout),
        Some(Commands::Delete {
            locator,
            credential,
            store,
        }) => cli::commands::delete::execute(locator, credential, store, &config, timeout),
        Some(Commands::Login {
            username,
            password,
            pastebin_token,
            url,
        }) => cli::commands::login::execute(
            username,
            password,
            pastebin_token.as_deref(),
            url.as_deref(),
            &config,
            timeout,
        ),
    }
}
