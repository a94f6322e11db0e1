pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::app_config::StoreKind;

/// Easily share links to your SSH public keys.
///
/// Collects keys from files, arguments, your SSH agent and GitHub, lets you
/// pick which ones to share, and uploads them as a curl-able
/// authorized_keys file.
#[derive(Parser, Debug)]
#[command(
    name = "sshare",
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Timeout in seconds for every network request
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the keys that would be offered, without uploading anything
    List {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Delete an uploaded authorized_keys file before it expires
    Delete {
        /// Download URL printed when the file was shared
        locator: String,
        /// Delete token printed when the file was shared
        credential: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Generate a reusable Pastebin user key from your account credentials
    Login {
        /// Pastebin username
        #[arg(long)]
        username: String,
        /// Pastebin password
        #[arg(long, env = "SSHARE_PASTEBIN_PASSWORD", hide_env_values = true)]
        password: String,
        /// Pastebin developer token
        #[arg(long, env = "SSHARE_PASTEBIN_TOKEN", hide_env_values = true)]
        pastebin_token: Option<String>,
        /// Base URL of the Pastebin instance
        #[arg(long)]
        url: Option<String>,
    },
}

/// Where keys come from.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Path to the target ssh agent socket
    #[arg(short = 'a', long = "agent", env = "SSH_AUTH_SOCK")]
    pub agent: Option<PathBuf>,

    /// Do not read keys from the ssh agent
    #[arg(long)]
    pub no_agent: bool,

    /// Passphrase for a locked ssh agent
    #[arg(short, long)]
    pub passphrase: Option<String>,

    /// GitHub token with permission to read your ssh keys
    #[arg(short, long, env = "SSHARE_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Additional public key file(s) to include
    #[arg(short = 'f', long = "key-file")]
    pub key_files: Vec<PathBuf>,

    /// Additional public key(s) to include
    #[arg(short = 'k', long = "key")]
    pub keys: Vec<String>,

    /// Share every key found instead of asking
    #[arg(long)]
    pub all: bool,
}

/// Where keys go to.
#[derive(Args, Debug, Default, Clone)]
pub struct StoreArgs {
    /// Remote store to upload to
    #[arg(long, value_enum)]
    pub store: Option<StoreKind>,

    /// Base URL of the transfer.sh or Pastebin instance
    #[arg(long)]
    pub url: Option<String>,

    /// File name of the upload (transfer.sh)
    #[arg(long)]
    pub filename: Option<String>,

    /// Maximum number of downloads (transfer.sh)
    #[arg(short = 'm', long)]
    pub max_downloads: Option<u32>,

    /// Number of days the upload stays available (transfer.sh)
    #[arg(short = 'd', long)]
    pub max_days: Option<u32>,

    /// Password for server-side encryption (transfer.sh)
    #[arg(short = 'e', long = "encrypt")]
    pub password: Option<String>,

    /// Pastebin developer token
    #[arg(long, env = "SSHARE_PASTEBIN_TOKEN", hide_env_values = true)]
    pub pastebin_token: Option<String>,

    /// Pastebin user key (see `sshare login`)
    #[arg(long)]
    pub pastebin_user_key: Option<String>,

    /// Pastebin folder key
    #[arg(long)]
    pub pastebin_folder: Option<String>,

    /// Paste expiry: N, 10M, 1H, 1D, 1W, 2W, 1M, 6M, 1Y (or never, day, week...)
    #[arg(long)]
    pub expiry: Option<String>,

    /// Paste visibility: public, unlisted or private
    #[arg(long)]
    pub visibility: Option<String>,
}
