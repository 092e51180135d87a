//! Pipedrive API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::error::{PipedriveError, Result};

const DEFAULT_API_URL: &str = "https://api.pipedrive.com/v1";
const USER_AGENT: &str = concat!("pipeview/", env!("CARGO_PKG_VERSION"));

/// Low-level Pipedrive API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, `Search`, `Create`, and
/// `Update` traits on model types.
///
/// Pipedrive authenticates with an `api_token` query parameter rather
/// than a header; the client appends it to every request.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use pipeview::PipedriveClient;
///
/// # fn example() -> pipeview::Result<()> {
/// // Create from environment variables
/// let client = PipedriveClient::from_env()?;
///
/// // Or configure manually
/// let client = PipedriveClient::new("your-api-token", "https://api.pipedrive.com/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PipedriveClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for PipedriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipedriveClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PipedriveClient {
    /// Create a client from environment variables.
    ///
    /// Uses `PIPEDRIVE_API_TOKEN` for authentication and optionally
    /// `PIPEDRIVE_API_URL` for the base URL (defaults to
    /// `https://api.pipedrive.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `PIPEDRIVE_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("PIPEDRIVE_API_TOKEN").map_err(|_| {
            PipedriveError::ConfigMissing(
                "PIPEDRIVE_API_TOKEN environment variable not set".to_string(),
            )
        })?;

        let base_url =
            env::var("PIPEDRIVE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Pipedrive API token
    /// * `base_url` - Base URL for the API (e.g., `https://api.pipedrive.com/v1`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(PipedriveError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .query(&[("api_token", self.token.as_str())])
            .send()
            .await
            .map_err(PipedriveError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .query(&[("api_token", self.token.as_str())])
            .query(query)
            .send()
            .await
            .map_err(PipedriveError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .query(&[("api_token", self.token.as_str())])
            .json(body)
            .send()
            .await
            .map_err(PipedriveError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .query(&[("api_token", self.token.as_str())])
            .json(body)
            .send()
            .await
            .map_err(PipedriveError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(PipedriveError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(PipedriveError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// Pipedrive error bodies carry `error` and sometimes `error_info`.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                if let Some(info) = json.get("error_info").and_then(|m| m.as_str()) {
                    return format!("{err} ({info})");
                }
                return err.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = PipedriveClient::new("test-token", "https://api.pipedrive.com/v1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("PipedriveClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = PipedriveClient::new("token", "https://api.pipedrive.com/v1").unwrap();
        let client2 = PipedriveClient::new("token", "https://api.pipedrive.com/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }
}
