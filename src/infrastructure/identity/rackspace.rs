use async_trait::async_trait;
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::{DomainError, IdentityProvider};

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identity.api.rackspacecloud.com";

const PROVIDER_NAME: &str = "rackspace";

/// Rackspace Identity v2.0 provider
///
/// Authenticates by requesting a token with API key credentials. The token
/// itself is discarded; only whether authentication succeeded matters.
#[derive(Debug)]
pub struct RackspaceIdentityProvider<C: HttpClientTrait> {
    client: C,
    endpoint: String,
}

impl<C: HttpClientTrait> RackspaceIdentityProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_endpoint(client, DEFAULT_IDENTITY_ENDPOINT)
    }

    pub fn with_endpoint(client: C, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();

        Self { client, endpoint }
    }

    fn tokens_url(&self) -> String {
        format!("{}/v2.0/tokens", self.endpoint)
    }

    fn build_request(account: &str, api_key: &str) -> serde_json::Value {
        serde_json::json!({
            "auth": {
                "RAX-KSKEY:apiKeyCredentials": {
                    "username": account,
                    "apiKey": api_key,
                }
            }
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Content-Type", "application/json"),
            ("Accept", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> IdentityProvider for RackspaceIdentityProvider<C> {
    async fn authenticate(&self, account: &str, api_key: &str) -> Result<bool, DomainError> {
        let body = Self::build_request(account, api_key);

        let status = self
            .client
            .post_json(&self.tokens_url(), self.headers(), &body)
            .await
            .map_err(|e| match e {
                DomainError::Provider { message, .. } => {
                    DomainError::provider(PROVIDER_NAME, message)
                }
                other => other,
            })?;

        debug!(account = %account, status = status, "Identity token request completed");

        match status {
            200..=299 => Ok(true),
            400 | 401 | 403 | 404 => Ok(false),
            other => Err(DomainError::provider(
                PROVIDER_NAME,
                format!("Unexpected identity response: HTTP {}", other),
            )),
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::infrastructure::identity::http_client::mock::MockHttpClient;
    use crate::infrastructure::identity::http_client::HttpClient;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_URL: &str = "https://identity.api.rackspacecloud.com/v2.0/tokens";

    #[tokio::test]
    async fn test_accepts_on_success_status() {
        let client = MockHttpClient::new().with_status(TEST_URL, 200);
        let provider = RackspaceIdentityProvider::new(client);

        let accepted = provider.authenticate("someone", "ff01ab").await.unwrap();

        assert!(accepted);
    }

    #[tokio::test]
    async fn test_rejects_on_unauthorized() {
        let client = MockHttpClient::new().with_status(TEST_URL, 401);
        let provider = RackspaceIdentityProvider::new(client);

        let accepted = provider.authenticate("someone", "ff01ab").await.unwrap();

        assert!(!accepted);
    }

    #[tokio::test]
    async fn test_server_error_is_provider_error() {
        let client = MockHttpClient::new().with_status(TEST_URL, 503);
        let provider = RackspaceIdentityProvider::new(client);

        let result = provider.authenticate("someone", "ff01ab").await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_transport_error_is_provider_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "connection refused");
        let provider = RackspaceIdentityProvider::new(client);

        let err = provider
            .authenticate("someone", "ff01ab")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Provider error: rackspace - connection refused"
        );
    }

    #[tokio::test]
    async fn test_request_body_carries_api_key_credentials() {
        let client = MockHttpClient::new().with_status(TEST_URL, 200);
        let provider = RackspaceIdentityProvider::new(client);

        provider.authenticate("someone", "ff01ab").await.unwrap();

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, TEST_URL);

        let credentials = &requests[0].1["auth"]["RAX-KSKEY:apiKeyCredentials"];
        assert_eq!(credentials["username"], "someone");
        assert_eq!(credentials["apiKey"], "ff01ab");
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let provider =
            RackspaceIdentityProvider::with_endpoint(MockHttpClient::new(), "http://localhost:5000/");

        assert_eq!(provider.tokens_url(), "http://localhost:5000/v2.0/tokens");
        assert_eq!(provider.name(), "rackspace");
    }

    #[tokio::test]
    async fn test_http_client_against_identity_server() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2.0/tokens"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "auth": {
                    "RAX-KSKEY:apiKeyCredentials": {
                        "username": "someone",
                        "apiKey": "ff01ab"
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access": { "token": { "id": "token-id" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2.0/tokens"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = RackspaceIdentityProvider::with_endpoint(HttpClient::new(), server.uri());

        assert!(provider.authenticate("someone", "ff01ab").await.unwrap());
        assert!(!provider.authenticate("someone", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_http_client_unreachable_endpoint() {
        let provider =
            RackspaceIdentityProvider::with_endpoint(HttpClient::new(), "http://127.0.0.1:1");

        let result = provider.authenticate("someone", "ff01ab").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_http_client_timeout_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2.0/tokens"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(Duration::from_millis(200)).unwrap();
        let provider = RackspaceIdentityProvider::with_endpoint(client, server.uri());

        let err = provider
            .authenticate("someone", "ff01ab")
            .await
            .unwrap_err();

        match err {
            DomainError::Provider { provider, message } => {
                assert_eq!(provider, "rackspace");
                assert!(message.starts_with("Request failed"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
