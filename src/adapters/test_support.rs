//! Helpers shared by adapter tests.

use wiremock::{Mock, MockServer, Request};

/// Start a mock HTTP server with `mocks` mounted.
///
/// The adapters under test drive their own runtime, so the server lives on
/// a separate multi-thread runtime that the caller keeps alive.
pub fn start_mock(mocks: Vec<Mock>) -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    });
    (rt, server)
}

/// Requests the server has seen so far.
pub fn received(rt: &tokio::runtime::Runtime, server: &MockServer) -> Vec<Request> {
    rt.block_on(server.received_requests()).unwrap_or_default()
}

/// Decode an `application/x-www-form-urlencoded` request body.
pub fn form_fields(request: &Request) -> Vec<(String, String)> {
    url_form(&String::from_utf8_lossy(&request.body))
}

fn url_form(body: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(&format!("http://form.invalid/?{body}"))
        .map(|u| u.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

pub fn form_value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}
