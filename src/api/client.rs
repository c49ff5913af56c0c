//! HTTP client for the account portal API.
//!
//! This module provides the `ApiClient` struct that all portal calls go
//! through. It owns the base URL, attaches the bearer token to every request
//! whose path is not in the public exclusion set, and funnels every transport
//! failure through one diagnostic log plus one generic user notice before
//! propagating the error to the caller.

use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::mpsc;
use tracing::{error, warn};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in milliseconds.
/// Set absurdly high so slow backend work (email delivery, cold starts) is
/// never cut off client-side; failures surface through the error funnel.
const REQUEST_TIMEOUT_MS: u64 = 3_000_000;

/// Paths that never carry the Authorization header.
/// Matches the web client's exclusion list, including the legacy
/// forgot-password entry; the two-step reset endpoints are not excluded.
const PUBLIC_PATHS: [&str; 3] = [
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/forgot-password",
];

/// The one user-facing message for any transport failure
pub(crate) const REQUEST_FAILED_NOTICE: &str = "Request failed, please contact the administrator";

/// API client for the account portal.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<String>,
    notices: mpsc::Sender<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    /// Transport failures emit one generic notice on `notices`.
    pub fn new(base_url: String, notices: mpsc::Sender<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            base_url,
            client,
            token: None,
            notices,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether a path is in the public exclusion set
    fn is_public_path(path: &str) -> bool {
        PUBLIC_PATHS.contains(&path)
    }

    /// Headers for a request to `path`: the bearer token when one is present
    /// and the path is not excluded, nothing otherwise.
    fn auth_headers(&self, path: &str) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if Self::is_public_path(path) {
            return headers;
        }
        if let Some(ref token) = self.token {
            match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(header::AUTHORIZATION, value);
                }
                // A token that cannot form a header could not authenticate anyway
                Err(e) => warn!(error = %e, "Bearer token not representable as a header"),
            }
        }
        headers
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send a prepared request and unwrap the response body.
    /// Network errors, non-2xx statuses, and parse failures all take the same
    /// exit: one `error!` with request context, one generic notice, then the
    /// error goes back to the caller.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
        payload: Option<String>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        match self.try_dispatch(request, path).await {
            Ok(value) => Ok(value),
            Err(e) => {
                let status = match &e {
                    ApiError::Status { status, .. } => Some(status.as_u16()),
                    _ => None,
                };
                error!(url = %url, status = ?status, payload = ?payload, error = %e, "Portal request failed");
                // The UI drains notices between calls; never block the
                // request path on a full channel.
                let _ = self.notices.try_send(REQUEST_FAILED_NOTICE.to_string());
                Err(e.into())
            }
        }
    }

    async fn try_dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = request.headers(self.auth_headers(path)).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// GET `path`, optionally with query parameters
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&[(&str, &str)]>,
        payload: Option<String>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }
        self.dispatch(request, path, payload).await
    }

    /// POST `path` with a JSON body
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        payload: Option<String>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.post(&url).json(body);
        self.dispatch(request, path, payload).await
    }

    /// POST `path` with a form-urlencoded body
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
        payload: Option<String>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.post(&url).form(form);
        self.dispatch(request, path, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::can_bind_localhost;
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> (ApiClient, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(32);
        let client = ApiClient::new(base_url, tx).unwrap();
        (client, rx)
    }

    fn ok_envelope() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "ok",
            "data": null
        }))
    }

    #[test]
    fn test_public_path_set() {
        assert!(ApiClient::is_public_path("/api/auth/login"));
        assert!(ApiClient::is_public_path("/api/auth/register"));
        assert!(ApiClient::is_public_path("/api/auth/forgot-password"));
        // The reset endpoints and logout are not excluded
        assert!(!ApiClient::is_public_path("/api/auth/logout"));
        assert!(!ApiClient::is_public_path("/api/auth/ask-code"));
        assert!(!ApiClient::is_public_path("/api/auth/reset-confirm"));
        assert!(!ApiClient::is_public_path("/api/auth/reset-password"));
        assert!(!ApiClient::is_public_path("/api/user/profile"));
    }

    #[tokio::test]
    async fn test_excluded_path_never_carries_token() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ok_envelope())
            .expect(1)
            .mount(&server)
            .await;

        let (mut client, _rx) = test_client(server.uri());
        client.set_token("tok-1".to_string());
        let _: Value = client
            .post_form("/api/auth/login", &[("username", "alice"), ("password", "pw")], None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(
            !requests[0].headers.contains_key("authorization"),
            "excluded path must not carry an Authorization header"
        );
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ok_envelope())
            .expect(1)
            .mount(&server)
            .await;

        let (mut client, _rx) = test_client(server.uri());
        client.set_token("tok-1".to_string());
        let _: Value = client.get("/api/auth/logout", None, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ok_envelope())
            .mount(&server)
            .await;

        let (client, _rx) = test_client(server.uri());
        let _: Value = client.get("/api/auth/logout", None, None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_cleared_token_stops_being_sent() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ok_envelope())
            .mount(&server)
            .await;

        let (mut client, _rx) = test_client(server.uri());
        client.set_token("tok-1".to_string());
        client.clear_token();
        let _: Value = client.get("/api/auth/logout", None, None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_non_2xx_logs_one_notice_and_propagates() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (client, mut rx) = test_client(server.uri());
        let result: Result<Value> = client.get("/api/auth/logout", None, None).await;
        let err = result.unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }

        assert_eq!(rx.try_recv().unwrap(), REQUEST_FAILED_NOTICE);
        assert!(rx.try_recv().is_err(), "exactly one notice per failure");
    }

    #[tokio::test]
    async fn test_unparseable_body_funnels_generic_notice() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let (client, mut rx) = test_client(server.uri());
        let result: Result<Value> = client.get("/api/auth/logout", None, None).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::InvalidResponse(_))
        ));
        assert_eq!(rx.try_recv().unwrap(), REQUEST_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_connection_failure_funnels_generic_notice() {
        if !can_bind_localhost() {
            return;
        }
        // Nothing listens on the mock server's port once it is dropped.
        // A builder-made server is not pooled, so dropping it really does
        // shut the listener down (pooled servers keep listening for reuse).
        let server = MockServer::builder().start().await;
        let dead_uri = server.uri();
        drop(server);

        let (client, mut rx) = test_client(dead_uri);
        let result: Result<Value> = client.get("/api/auth/logout", None, None).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Network(_))
        ));
        assert_eq!(rx.try_recv().unwrap(), REQUEST_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_success_returns_parsed_body() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "message": "logged out",
                "data": null
            })))
            .mount(&server)
            .await;

        let (client, mut rx) = test_client(server.uri());
        let value: Value = client.get("/api/auth/logout", None, None).await.unwrap();
        assert_eq!(value["message"], "logged out");
        assert!(rx.try_recv().is_err(), "success emits no notice");
    }
}
