//! Shared test utilities for integration tests against a mock BBB server.

#![allow(dead_code)]

use bbb_api::checksum;
use bbb_core::config::AppConfig;
use bbb_services::MeetingService;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockBuilder, MockServer, Request, ResponseTemplate};

pub const SECRET: &str = "test-shared-secret";

/// Matches requests whose `checksum` parameter is valid for `SECRET`.
pub struct ValidChecksum;

impl Match for ValidChecksum {
    fn matches(&self, request: &Request) -> bool {
        let call = match request.url.path_segments().and_then(|s| s.last()) {
            Some(c) => c.to_string(),
            None => return false,
        };
        let query = request.url.query().unwrap_or_default();
        let (signed, sum) = match query.rsplit_once("checksum=") {
            Some(parts) => parts,
            None => return false,
        };
        let signed = signed.strip_suffix('&').unwrap_or(signed);
        sum == checksum(&call, signed, SECRET)
    }
}

/// Start a mock server and a service pointed at it.
pub async fn setup() -> (MockServer, MeetingService) {
    let server = MockServer::start().await;
    let svc = MeetingService::new(test_config(&server.uri())).expect("failed to build service");
    (server, svc)
}

/// Default configuration aimed at `server_url` with the test secret.
pub fn test_config(server_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.server_url = server_url.to_string();
    config.server.shared_secret = SECRET.to_string();
    config.server.request_timeout_ms = 5_000;
    config
}

/// A signed GET for one BBB call.
pub fn bbb_call(call: &str) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path(format!("/api/{call}")))
        .and(ValidChecksum)
}

pub fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml")
        .set_body_string(body)
}

pub fn success(fields: &str) -> ResponseTemplate {
    xml(format!(
        "<response><returncode>SUCCESS</returncode>{fields}</response>"
    ))
}

pub fn failed(key: &str, message: &str) -> ResponseTemplate {
    xml(format!(
        "<response><returncode>FAILED</returncode><messageKey>{key}</messageKey>\
         <message>{message}</message></response>"
    ))
}

pub fn running(is_running: bool) -> ResponseTemplate {
    success(&format!("<running>{is_running}</running>"))
}

pub fn server_error() -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_string("Internal Server Error")
}

/// Value of a query parameter in a URL string.
pub fn query_value(url: &str, key: &str) -> Option<String> {
    let parsed = bbb_api::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
