use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::adapters::http;
use crate::core::errors::{Result, SshareError};
use crate::core::models::upload::{Publication, UploadConfig, UploadResult};
use crate::core::traits::remote_store::RemoteStore;

/// Base URL of the public transfer.sh instance.
pub const DEFAULT_TRANSFER_URL: &str = "https://transfer.sh";

/// Header carrying the full delete URL of an upload.
const DELETE_URL_HEADER: &str = "X-Url-Delete";

/// File store speaking the transfer.sh protocol.
///
/// `PUT {base}/{filename}` with retention headers; the body of the reply is
/// the download URL and `X-Url-Delete` holds the delete URL.
pub struct TransferStore {
    base_url: Url,
    config: UploadConfig,
    timeout: Duration,
}

impl TransferStore {
    /// Create a store for `base_url`. Non-http(s) URLs are rejected here,
    /// before any request is made.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: http::parse_base_url(base_url)?,
            config: UploadConfig::default(),
            timeout: http::DEFAULT_TIMEOUT,
        })
    }

    /// Settings used by [`RemoteStore::publish`].
    pub fn with_config(self, config: UploadConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Upload `data` as a plain-text file.
    pub fn upload(&self, config: &UploadConfig, data: &str) -> Result<UploadResult> {
        let upload_url = http::join_url(&self.base_url, &[config.filename.as_str()])?;
        let upload_err = |reason: String| SshareError::Upload { reason };

        http::block_on(async {
            let client = http::build_client(self.timeout)?;
            let mut request = client
                .put(upload_url.clone())
                .header("Content-Type", "text/plain")
                .header("Max-Downloads", config.max_downloads.to_string())
                .header("Max-Days", config.max_days.to_string())
                .body(data.to_string());
            if let Some(password) = &config.password {
                request = request.header("X-Encrypt-Password", password);
            }

            let resp = request
                .send()
                .await
                .map_err(|e| upload_err(format!("request to {upload_url} failed: {e}")))?;

            let status = resp.status();
            if status != StatusCode::OK {
                return Err(upload_err(format!("{upload_url} returned status {status}")));
            }

            let delete_url = resp
                .headers()
                .get(DELETE_URL_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .trim()
                .to_string();
            let locator = http::read_body(resp, upload_err).await?.trim().to_string();

            let delete_credential = last_path_segment(&delete_url);
            if locator.is_empty() || delete_credential.is_empty() {
                return Err(upload_err(
                    "the store did not return both a download and a delete URL".into(),
                ));
            }

            Ok(UploadResult {
                locator,
                delete_credential: delete_credential.to_string(),
            })
        })
    }

    /// Delete an upload via `DELETE {locator}/{credential}`.
    pub fn delete(&self, locator: &str, credential: &str) -> Result<()> {
        let delete_err = |reason: String| SshareError::Delete { reason };
        if credential.trim().is_empty() {
            return Err(delete_err("delete token is empty".into()));
        }
        let locator_url = http::parse_base_url(locator.trim())?;
        let delete_url = http::join_url(&locator_url, &[credential.trim()])?;

        http::block_on(async {
            let client = http::build_client(self.timeout)?;
            let resp = client
                .delete(delete_url.clone())
                .send()
                .await
                .map_err(|e| delete_err(format!("request to {delete_url} failed: {e}")))?;

            match resp.status() {
                StatusCode::OK => Ok(()),
                status => Err(delete_err(format!("{delete_url} returned status {status}"))),
            }
        })
    }
}

impl RemoteStore for TransferStore {
    fn name(&self) -> &str {
        "transfer.sh"
    }

    fn publish(&self, data: &str) -> Result<Publication> {
        self.upload(&self.config, data).map(Publication::from)
    }

    fn delete(&self, locator: &str, credential: &str) -> Result<()> {
        TransferStore::delete(self, locator, credential)
    }
}

/// Final `/`-separated segment, ignoring a trailing slash.
fn last_path_segment(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}
