use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::adapters::http;
use crate::core::errors::{Result, SshareError};
use crate::core::models::key::Key;
use crate::core::models::key_listing::KeyListing;
use crate::core::traits::key_source::KeySource;

const GITHUB_API_URL: &str = "https://api.github.com";

/// One entry of `GET /user/keys`.
#[derive(Debug, Deserialize)]
pub struct GitHubKey {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

/// Public keys of the GitHub account that owns a token.
pub struct GitHubKeySource {
    api_url: Url,
    token: String,
    timeout: Duration,
}

impl GitHubKeySource {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_api_url(GITHUB_API_URL, token)
    }

    /// Point at another API root (GitHub Enterprise, tests).
    pub fn with_api_url(api_url: &str, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SshareError::InvalidConfig {
                detail: "GitHub token is empty".into(),
            });
        }
        Ok(Self {
            api_url: http::parse_base_url(api_url)?,
            token,
            timeout: http::DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    fn source_err(&self, reason: String) -> SshareError {
        SshareError::KeySource {
            source_name: self.name().to_string(),
            reason,
        }
    }

    fn list_account_keys(&self) -> Result<Vec<GitHubKey>> {
        let url = http::join_url(&self.api_url, &["user", "keys"])?;

        http::block_on(async {
            let client = http::build_client(self.timeout)?;
            let resp = client
                .get(url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github+json")
                .send()
                .await
                .map_err(|e| self.source_err(format!("GitHub API request failed: {e}")))?;

            if !resp.status().is_success() {
                return Err(self.source_err(format!("GitHub API returned status {}", resp.status())));
            }

            resp.json::<Vec<GitHubKey>>()
                .await
                .map_err(|e| self.source_err(format!("Failed to parse GitHub response: {e}")))
        })
    }
}

impl KeySource for GitHubKeySource {
    fn name(&self) -> &str {
        "GitHub"
    }

    fn fetch_keys(&mut self) -> Result<KeyListing> {
        let keys = self
            .list_account_keys()?
            .into_iter()
            .map(|gh| {
                Key::parse(&gh.key, &gh.title)
                    .map_err(|e| self.source_err(format!("failed to parse key '{}': {e}", gh.title)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(KeyListing::new(keys))
    }
}
