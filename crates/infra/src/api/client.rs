//! HTTP client for the portal REST API
//!
//! Thin wrapper over `reqwest` that attaches the session bearer token and
//! maps HTTP failures into [`ApiError`]. One request per call; the
//! telemetry pipeline treats every failure as terminal, so there is no
//! retry layer here.

use std::sync::Arc;
use std::time::Duration;

use campustrace_domain::ApiConfig;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;

/// Portal API client shared by all adapters.
pub struct PortalApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AccessTokenProvider>,
    timeout: Duration,
}

impl PortalApiClient {
    /// Create a client from API settings and a token provider.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &ApiConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("campustrace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
            timeout: config.timeout(),
        })
    }

    /// Execute a GET request and deserialize the JSON response.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET request");

        let token = self.auth.access_token().await?;

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, self.timeout))?;

        Self::decode(response, &url).await
    }

    /// Execute a POST request with a JSON body and deserialize the response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST request");

        let token = self.auth.access_token().await?;

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, self.timeout))?;

        Self::decode(response, &url).await
    }

    /// Execute a PUT request with a JSON body and deserialize the response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "PUT request");

        let token = self.auth.access_token().await?;

        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, self.timeout))?;

        Self::decode(response, &url).await
    }

    async fn decode<R: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<R, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, url, body));
        }

        // 204/205 carry no body; deserialize the unit-like types from null
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "no-content response ({}) for a type that requires a body",
                    status.as_u16()
                ))
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Client(format!("failed to parse response: {e}")))
    }

    fn map_transport_error(err: reqwest::Error, timeout: Duration) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else {
            ApiError::Network(err.to_string())
        }
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Clone)]
    struct MockAuthProvider {
        token: String,
    }

    #[async_trait]
    impl AccessTokenProvider for MockAuthProvider {
        async fn access_token(&self) -> Result<String, ApiError> {
            Ok(self.token.clone())
        }
    }

    fn client_for(server: &MockServer) -> PortalApiClient {
        let config = ApiConfig { base_url: server.uri(), timeout_seconds: 5 };
        let auth = Arc::new(MockAuthProvider { token: "test-token".to_string() });
        PortalApiClient::new(&config, auth).unwrap()
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
    }

    #[derive(Debug, serde::Serialize)]
    struct TestRequest {
        data: String,
    }

    #[tokio::test]
    async fn get_with_json_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "success".to_string() }),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: TestResponse = client.get("/test").await.unwrap();
        assert_eq!(result.message, "success");
    }

    #[tokio::test]
    async fn post_sends_bearer_token_and_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Content-Type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "created".to_string() }),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = TestRequest { data: "test".to_string() };
        let result: TestResponse = client.post("/create", &request).await.unwrap();
        assert_eq!(result.message, "created");
    }

    #[tokio::test]
    async fn post_with_204_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/action"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = TestRequest { data: "test".to_string() };
        let result: Result<(), ApiError> = client.post("/action", &request).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn status_401_maps_to_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/protected"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<TestResponse, ApiError> = client.get("/protected").await;
        assert!(matches!(result.unwrap_err(), ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn put_replaces_resource() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/replace"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = TestRequest { data: "test".to_string() };
        let result: Result<(), ApiError> = client.put("/replace", &request).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn status_429_maps_to_rate_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/limited"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<TestResponse, ApiError> = client.get("/limited").await;
        assert!(matches!(result.unwrap_err(), ApiError::RateLimit(_)));
    }

    #[tokio::test]
    async fn status_500_maps_to_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal server error"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<TestResponse, ApiError> = client.get("/error").await;
        assert!(matches!(result.unwrap_err(), ApiError::Server(_)));
    }

    #[tokio::test]
    async fn status_404_maps_to_client_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notfound"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<TestResponse, ApiError> = client.get("/notfound").await;
        assert!(matches!(result.unwrap_err(), ApiError::Client(_)));
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        struct NoToken;

        #[async_trait]
        impl AccessTokenProvider for NoToken {
            async fn access_token(&self) -> Result<String, ApiError> {
                Err(ApiError::Auth("no session token available".to_string()))
            }
        }

        let server = MockServer::start().await;
        let config = ApiConfig { base_url: server.uri(), timeout_seconds: 5 };
        let client = PortalApiClient::new(&config, Arc::new(NoToken)).unwrap();

        let result: Result<TestResponse, ApiError> = client.get("/anything").await;
        assert!(matches!(result.unwrap_err(), ApiError::Auth(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
