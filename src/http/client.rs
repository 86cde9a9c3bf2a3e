//! HTTP request executor
//!
//! Attaches credentials, sends one request and classifies what came back
//! into a [`ResponseOutcome`] so endpoint code can match on it exhaustively.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Upper bound on error bodies read into error messages
pub const MAX_ERROR_BODY_BYTES: usize = 1024 * 1024;

/// Classified result of one request
#[derive(Debug)]
pub enum ResponseOutcome {
    /// HTTP 200
    Success(Response),
    /// HTTP 401, the API key was rejected
    Unauthorized(Response),
    /// Any other status code
    Status(Response),
    /// The request never produced a response (connect, DNS, timeout)
    Transport(reqwest::Error),
}

impl ResponseOutcome {
    /// Status code of the response, if there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Success(r) | Self::Unauthorized(r) | Self::Status(r) => Some(r.status()),
            Self::Transport(_) => None,
        }
    }

    /// Keep the response only on HTTP 200.
    ///
    /// 401 becomes [`Error::NotAuthorized`], every other status
    /// becomes [`Error::BadStatus`].
    pub fn into_success(self) -> Result<Response> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Unauthorized(_) => Err(Error::NotAuthorized),
            Self::Status(response) => Err(Error::bad_status(response.status().as_u16())),
            Self::Transport(e) => Err(Error::Http(e)),
        }
    }
}

/// Authenticated HTTP client for the Cuckoo API
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    /// Create a client from the given configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(config: &ClientConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one authenticated request and classify the outcome.
    ///
    /// Dropping the returned future aborts the request.
    pub async fn execute(&self, method: Method, path: &str) -> ResponseOutcome {
        let url = self.build_url(path);
        debug!(%method, %url, "sending request");

        let result = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();
                debug!(status = status.as_u16(), %url, "received response");
                match status {
                    StatusCode::OK => ResponseOutcome::Success(response),
                    StatusCode::UNAUTHORIZED => ResponseOutcome::Unauthorized(response),
                    _ => ResponseOutcome::Status(response),
                }
            }
            Err(e) => {
                debug!(error = %e, %url, "request failed");
                ResponseOutcome::Transport(e)
            }
        }
    }

    /// GET `path` and require HTTP 200
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(Method::GET, path).await.into_success()
    }

    /// GET `path`, require HTTP 200 and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        read_json(response).await
    }

    /// Build full URL from path
    pub(crate) fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &!self.api_key.is_empty())
            .finish_non_exhaustive()
    }
}

/// Read the whole body and decode it as JSON
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
}

/// Read at most [`MAX_ERROR_BODY_BYTES`] of the body as text, empty on failure
pub(crate) async fn read_error_body(response: Response) -> String {
    match response.bytes().await {
        Ok(bytes) => {
            let end = bytes.len().min(MAX_ERROR_BODY_BYTES);
            String::from_utf8_lossy(&bytes[..end]).into_owned()
        }
        Err(_) => String::new(),
    }
}
