use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::adapters::http;
use crate::core::errors::{Result, SshareError};
use crate::core::models::paste::{ExpiryTime, PasteConfig, Visibility};
use crate::core::models::upload::Publication;
use crate::core::traits::remote_store::RemoteStore;

/// Syntax highlighting marker sent with every paste.
const PASTE_FORMAT: &str = "sshconfig";

/// Client for the Pastebin form-POST API.
///
/// Every call carries the developer token. An optional user key makes
/// pastes belong to an account (needed for private pastes and folders).
pub struct PastebinStore {
    base_url: Url,
    config: PasteConfig,
    expiry: ExpiryTime,
    visibility: Visibility,
    timeout: Duration,
}

impl PastebinStore {
    /// Validate `config` and build a store. Publishing defaults to an
    /// unlisted paste that expires after one day.
    pub fn new(config: PasteConfig) -> Result<Self> {
        if config.dev_token.trim().is_empty() {
            return Err(SshareError::InvalidConfig {
                detail: "a pastebin developer token is required".into(),
            });
        }
        Ok(Self {
            base_url: http::parse_base_url(&config.endpoint_base)?,
            config,
            expiry: ExpiryTime::OneDay,
            visibility: Visibility::Unlisted,
            timeout: http::DEFAULT_TIMEOUT,
        })
    }

    /// Expiry and visibility used by [`RemoteStore::publish`]. Invalid
    /// values are rejected here, at configuration time.
    pub fn with_paste_options(self, expiry: ExpiryTime, visibility: Visibility) -> Result<Self> {
        validate_options(expiry, visibility)?;
        Ok(Self {
            expiry,
            visibility,
            ..self
        })
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Exchange account credentials for a user key that does not expire.
    ///
    /// The key is returned exactly as the API sent it.
    pub fn generate_user_key(&self, username: &str, password: &str) -> Result<String> {
        let login_url = http::join_url(&self.base_url, &["api", "api_login.php"])?;
        let auth_err = |reason: String| SshareError::Auth { reason };
        let form = [
            ("api_dev_key", self.config.dev_token.as_str()),
            ("api_user_name", username),
            ("api_user_password", password),
        ];

        http::block_on(async {
            let client = http::build_client(self.timeout)?;
            let resp = client
                .post(login_url.clone())
                .form(&form)
                .send()
                .await
                .map_err(|e| auth_err(format!("login request failed: {e}")))?;

            let status = resp.status();
            if status != StatusCode::OK {
                return Err(auth_err(format!("status {status}")));
            }
            http::read_body(resp, auth_err).await
        })
    }

    /// Create a paste and return its code (the path of the returned URL).
    pub fn post(&self, paste: &str, expiry: ExpiryTime, visibility: Visibility) -> Result<String> {
        validate_options(expiry, visibility)?;
        let post_url = http::join_url(&self.base_url, &["api", "api_post.php"])?;
        let post_err = |reason: String| SshareError::Post { reason };

        let mut form = vec![
            ("api_dev_key", self.config.dev_token.as_str()),
            ("api_option", "paste"),
            ("api_paste_format", PASTE_FORMAT),
            ("api_paste_private", visibility.code()),
            ("api_paste_expire_date", expiry.code()),
        ];
        if let Some(user_key) = &self.config.user_key {
            form.push(("api_user_key", user_key.as_str()));
        }
        if let Some(folder_key) = &self.config.folder_key {
            form.push(("api_folder_key", folder_key.as_str()));
        }
        form.push(("api_paste_code", paste));

        http::block_on(async {
            let client = http::build_client(self.timeout)?;
            let resp = client
                .post(post_url.clone())
                .form(&form)
                .send()
                .await
                .map_err(|e| post_err(format!("new paste request failed: {e}")))?;

            let status = resp.status();
            let body = http::read_body(resp, post_err).await?;
            if status != StatusCode::OK {
                return Err(post_err(format!("status {status} ({})", body.trim())));
            }
            paste_code(&body).ok_or_else(|| {
                post_err(format!("no valid paste URL was returned: {}", body.trim()))
            })
        })
    }

    /// Browser URL of a paste.
    pub fn paste_url(&self, code: &str) -> Result<String> {
        http::join_url(&self.base_url, &[code]).map(String::from)
    }

    /// Plain-text URL of a paste, suitable for `curl >> authorized_keys`.
    pub fn raw_paste_url(&self, code: &str) -> Result<String> {
        http::join_url(&self.base_url, &["raw", code]).map(String::from)
    }
}

impl RemoteStore for PastebinStore {
    fn name(&self) -> &str {
        "pastebin"
    }

    fn publish(&self, data: &str) -> Result<Publication> {
        let code = self.post(data, self.expiry, self.visibility)?;
        Ok(Publication {
            locator: self.paste_url(&code)?,
            raw_locator: Some(self.raw_paste_url(&code)?),
            delete_credential: None,
        })
    }
}

fn validate_options(expiry: ExpiryTime, visibility: Visibility) -> Result<()> {
    if !expiry.is_valid() {
        return Err(SshareError::InvalidConfig {
            detail: "paste expiry is not a recognised value".into(),
        });
    }
    if !visibility.is_valid() {
        return Err(SshareError::InvalidConfig {
            detail: "paste visibility is not a recognised value".into(),
        });
    }
    Ok(())
}

/// Extract the paste code from the URL returned by the API.
fn paste_code(body: &str) -> Option<String> {
    let url = Url::parse(body.trim()).ok()?;
    let code = url.path().trim_start_matches('/');
    (!code.is_empty()).then(|| code.to_string())
}
