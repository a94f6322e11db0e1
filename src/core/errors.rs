use std::path::PathBuf;

/// All domain errors for sshare.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum SshareError {
    #[error(
        "Invalid public key: {detail}\n\n  \
         Expected a single authorized_keys line, e.g.:\n    \
         ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAA... user@host"
    )]
    KeyParse { detail: String },

    #[error("Key file not found: {path}")]
    KeyFileNotFound { path: PathBuf },

    #[error(
        "Could not connect to SSH agent at {path}: {reason}\n\n  \
         Solutions:\n    \
         → Check that an agent is running: ssh-add -l\n    \
         → Point sshare at the right socket: --agent $SSH_AUTH_SOCK"
    )]
    AgentConnection { path: PathBuf, reason: String },

    #[error("SSH agent error: {reason}")]
    Agent { reason: String },

    #[error(
        "Invalid URL '{url}': {reason}\n\n  \
         Only http:// and https:// URLs are accepted."
    )]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Failed to read config file {path}: {detail}\n\n  \
         Fix the file or point to another one with --config <path>."
    )]
    ConfigFile { path: PathBuf, detail: String },

    #[error("Upload failed: {reason}")]
    Upload { reason: String },

    #[error(
        "Paste failed: {reason}\n\n  \
         Check your developer token and, if set, your user key."
    )]
    Post { reason: String },

    #[error(
        "Pastebin login failed: {reason}\n\n  \
         Check the username, password and developer token."
    )]
    Auth { reason: String },

    #[error(
        "Delete failed: {reason}\n\n  \
         The file may already be deleted or expired."
    )]
    Delete { reason: String },

    #[error("Could not fetch keys from {source_name}: {reason}")]
    KeySource { source_name: String, reason: String },

    #[error("{reason}")]
    Selection { reason: String },

    #[error("{store} does not support {operation}")]
    Unsupported {
        store: String,
        operation: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SshareError>;
