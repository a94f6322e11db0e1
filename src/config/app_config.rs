use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::http::DEFAULT_TIMEOUT;
use crate::core::errors::{Result, SshareError};

/// Which remote store receives the authorized_keys body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// transfer.sh-compatible PUT store
    #[default]
    Transfer,
    /// Pastebin paste API
    Pastebin,
}

/// Optional user configuration read from `<config_dir>/sshare/config.toml`.
///
/// Every field can be overridden on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub defaults: DefaultsSection,
    pub transfer: TransferSection,
    pub pastebin: PastebinSection,
}

/// The `[defaults]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsSection {
    pub store: Option<StoreKind>,
    pub timeout_secs: Option<u64>,
}

/// The `[transfer]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransferSection {
    pub url: Option<String>,
    pub filename: Option<String>,
    pub max_downloads: Option<u32>,
    pub max_days: Option<u32>,
}

/// The `[pastebin]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PastebinSection {
    pub url: Option<String>,
    pub dev_token: Option<String>,
    pub user_key: Option<String>,
    pub folder_key: Option<String>,
    pub expiry: Option<String>,
    pub visibility: Option<String>,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit `custom` path must exist. The default location is
    /// optional: when it is missing the built-in defaults apply.
    pub fn load(custom: Option<&Path>) -> Result<Self> {
        let path = match custom {
            Some(path) => {
                if !path.exists() {
                    return Err(SshareError::ConfigFile {
                        path: path.to_path_buf(),
                        detail: "file does not exist".into(),
                    });
                }
                path.to_path_buf()
            }
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| SshareError::ConfigFile {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        Self::parse(&content, &path)
    }

    /// Parse config file content; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| SshareError::ConfigFile {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Request timeout, falling back to the built-in default.
    pub fn timeout(&self, cli_secs: Option<u64>) -> Result<Duration> {
        match cli_secs.or(self.defaults.timeout_secs) {
            Some(0) => Err(SshareError::InvalidConfig {
                detail: "timeout must be at least 1 second".into(),
            }),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(DEFAULT_TIMEOUT),
        }
    }
}

/// `<config_dir>/sshare/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sshare").join("config.toml"))
}

/// Retention limits must allow at least one download for at least one day.
pub fn validate_retention(max_downloads: u32, max_days: u32) -> Result<()> {
    if max_days == 0 {
        return Err(SshareError::InvalidConfig {
            detail: "uploaded content must be visible for at least 1 day".into(),
        });
    }
    if max_downloads == 0 {
        return Err(SshareError::InvalidConfig {
            detail: "uploaded content must be downloadable at least 1 time".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let content = r#"
            [defaults]
            store = "pastebin"
            timeout_secs = 5

            [transfer]
            url = "https://transfer.example"
            max_downloads = 3
            max_days = 1

            [pastebin]
            dev_token = "dev"
            expiry = "1W"
            visibility = "private"
        "#;
        let config = AppConfig::parse(content, Path::new("config.toml")).unwrap();

        assert_eq!(config.defaults.store, Some(StoreKind::Pastebin));
        assert_eq!(config.timeout(None).unwrap(), Duration::from_secs(5));
        assert_eq!(config.transfer.url.as_deref(), Some("https://transfer.example"));
        assert_eq!(config.transfer.max_downloads, Some(3));
        assert_eq!(config.pastebin.dev_token.as_deref(), Some("dev"));
        assert_eq!(config.pastebin.visibility.as_deref(), Some("private"));
    }

    #[test]
    fn empty_config_is_default() {
        let config = AppConfig::parse("", Path::new("config.toml")).unwrap();
        assert!(config.defaults.store.is_none());
        assert_eq!(config.timeout(None).unwrap(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = AppConfig::parse("[transfer]\nmax_dayz = 3\n", Path::new("config.toml"));
        assert!(matches!(result, Err(SshareError::ConfigFile { .. })));
    }

    #[test]
    fn cli_timeout_wins_and_zero_is_rejected() {
        let config = AppConfig::parse("[defaults]\ntimeout_secs = 5\n", Path::new("c")).unwrap();
        assert_eq!(config.timeout(Some(9)).unwrap(), Duration::from_secs(9));
        assert!(config.timeout(Some(0)).is_err());
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(SshareError::ConfigFile { .. })));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[transfer]\nfilename = \"keys\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.transfer.filename.as_deref(), Some("keys"));
    }

    #[test]
    fn retention_limits() {
        assert!(validate_retention(1, 1).is_ok());
        assert!(validate_retention(0, 1).is_err());
        assert!(validate_retention(1, 0).is_err());
    }
}
