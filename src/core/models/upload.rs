/// Settings for a single upload to a PUT-style file store.
///
/// Built with chained `with_*` calls, each returning a modified copy:
///
/// ```text
/// UploadConfig::default().with_max_days(1).with_password("s3cret")
/// ```
///
/// Retention values are validated by the caller before uploading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub filename: String,
    pub max_downloads: u32,
    pub max_days: u32,
    pub password: Option<String>,
}

/// Default file name for uploads.
pub const DEFAULT_FILENAME: &str = "authorized_keys";
pub const DEFAULT_MAX_DOWNLOADS: u32 = 10;
pub const DEFAULT_MAX_DAYS: u32 = 2;

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            max_downloads: DEFAULT_MAX_DOWNLOADS,
            max_days: DEFAULT_MAX_DAYS,
            password: None,
        }
    }
}

impl UploadConfig {
    pub fn with_filename(self, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..self
        }
    }

    pub fn with_max_downloads(self, max_downloads: u32) -> Self {
        Self {
            max_downloads,
            ..self
        }
    }

    pub fn with_max_days(self, max_days: u32) -> Self {
        Self { max_days, ..self }
    }

    /// Server-side encryption password. An empty string clears it.
    pub fn with_password(self, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            password: (!password.is_empty()).then_some(password),
            ..self
        }
    }
}

/// What a PUT-style store hands back after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Download URL of the uploaded file.
    pub locator: String,
    /// Final path segment of the store's delete URL.
    pub delete_credential: String,
}

/// Store-independent outcome of publishing an authorized_keys body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub locator: String,
    /// Plain-text variant of the locator, when the store serves one separately.
    pub raw_locator: Option<String>,
    pub delete_credential: Option<String>,
}

impl From<UploadResult> for Publication {
    fn from(result: UploadResult) -> Self {
        Self {
            locator: result.locator,
            raw_locator: None,
            delete_credential: Some(result.delete_credential),
        }
    }
}
