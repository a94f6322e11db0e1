use std::future::Future;
use std::time::Duration;

use reqwest::Url;

use crate::core::errors::{Result, SshareError};

/// Timeout applied to every outbound request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest client with the given timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("sshare/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SshareError::InvalidConfig {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Drive a single request future to completion on a fresh current-thread runtime.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(future)
}

/// Parse a store base URL, accepting only `http` and `https`.
pub fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| SshareError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SshareError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Append path segments to `base`, tolerating a trailing slash on the base.
/// A `/` inside a segment starts a new path segment; empty segments are dropped.
pub fn join_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SshareError::InvalidUrl {
            url: base.to_string(),
            reason: "URL cannot have a path".into(),
        })?
        .pop_if_empty()
        .extend(
            segments
                .iter()
                .flat_map(|segment| segment.split('/'))
                .filter(|segment| !segment.is_empty()),
        );
    Ok(url)
}

/// Read the body of a response, mapping transport errors with `err`.
pub async fn read_body(
    resp: reqwest::Response,
    err: impl Fn(String) -> SshareError,
) -> Result<String> {
    resp.text()
        .await
        .map_err(|e| err(format!("failed to read response: {e}")))
}
