use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CHAT_REQUEST_DURATION, CHAT_REQUEST_ERRORS, CHAT_REQUESTS};
use crate::types::ChatRequest;

/// The endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://9kv632fosa.execute-api.us-west-2.amazonaws.com/prod/assistant";
/// How long a single exchange may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest slice of an error body kept in an [`Error::Api`].
const ERROR_BODY_LIMIT: usize = 512;

/// Delivers a request envelope to the assistant and returns the raw reply.
///
/// Implementations return `Err` for anything that is not a 2xx answer;
/// interpreting the body is the caller's job.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Post `request` and return the response body.
    async fn post(&self, request: &ChatRequest) -> Result<String>;
}

/// HTTP client for the assistant endpoint.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Duration,
}

impl AssistantClient {
    /// Create a client for the default endpoint.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(endpoint: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.unwrap_or(DEFAULT_ENDPOINT))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::validation(
                format!("unsupported endpoint scheme: {}", endpoint.scheme()),
                Some("endpoint".to_string()),
            ));
        }

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Turn a non-2xx response into an [`Error::Api`].
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status_code, error = %e, "failed to read error body");
                String::new()
            }
        };
        let mut message = body.trim().to_string();
        if message.len() > ERROR_BODY_LIMIT {
            let mut cut = ERROR_BODY_LIMIT;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        Error::api(status_code, message)
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(e.to_string(), Some(self.timeout.as_secs_f64()))
        } else if e.is_connect() {
            Error::connection(e.to_string(), Some(Box::new(e)))
        } else {
            Error::http_client(e.to_string(), Some(Box::new(e)))
        }
    }

    async fn post_inner(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(Self::default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.text().await.map_err(|e| self.map_send_error(e))
    }
}

#[async_trait::async_trait]
impl Transport for AssistantClient {
    async fn post(&self, request: &ChatRequest) -> Result<String> {
        CHAT_REQUESTS.click();
        debug!(
            endpoint = %self.endpoint,
            user_id = %request.user_id,
            session_id = %request.session_id,
            has_file = request.file.is_some(),
            "posting chat request"
        );
        let start = Instant::now();
        let result = self.post_inner(request).await;
        CHAT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CHAT_REQUEST_ERRORS.click();
            warn!(error = %err, "chat request failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AssistantClient::new().unwrap();
        assert_eq!(client.endpoint().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = AssistantClient::with_options(
            Some("http://localhost:8080/assistant"),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8080/assistant");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(matches!(
            AssistantClient::with_options(Some("not a url"), None),
            Err(Error::Url { .. })
        ));
        assert!(
            AssistantClient::with_options(Some("ftp://example.com/x"), None)
                .unwrap_err()
                .is_validation()
        );
    }
}
