//! VPN endpoint

use super::Client;
use crate::error::{Error, Result};
use crate::http::{read_error_body, read_json, ResponseOutcome};
use crate::types::JsonValue;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: String,
}

impl Client {
    /// Status of the configured VPNs, as the server reports it
    pub async fn vpn_status(&self) -> Result<JsonValue> {
        match self.http.execute(Method::GET, "vpn/status").await {
            ResponseOutcome::Success(response) => read_json(response).await,
            ResponseOutcome::Status(response) if response.status() == StatusCode::NOT_FOUND => {
                Err(Error::api("vpn status not available"))
            }
            ResponseOutcome::Status(response) => {
                let status = response.status().as_u16();
                let body = read_error_body(response).await;
                let message = serde_json::from_str::<ServerMessage>(&body)
                    .map(|m| m.message)
                    .unwrap_or_default();
                Err(Error::api(format!(
                    "bad response code: {status}, message: {message}"
                )))
            }
            other => other.into_success().map(|_| JsonValue::Null),
        }
    }
}
