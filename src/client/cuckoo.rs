//! Server endpoints

use super::{expect_success, Client};
use crate::error::{Error, Result};
use crate::http::read_json;
use crate::types::CuckooStatus;
use reqwest::{Method, StatusCode};

impl Client {
    /// Version, task and machine counts, and disk usage of the server
    pub async fn cuckoo_status(&self) -> Result<CuckooStatus> {
        let response = self
            .http
            .execute(Method::GET, "cuckoo/status")
            .await
            .into_success()?;
        read_json(response).await
    }

    /// Shut the server down.
    ///
    /// Only honoured when the API server runs in debug mode.
    pub async fn exit(&self) -> Result<()> {
        let outcome = self.http.execute(Method::GET, "exit").await;
        expect_success(outcome, |status| match status {
            StatusCode::FORBIDDEN => Some(Error::api(
                "this call can only be used in debug mode",
            )),
            StatusCode::INTERNAL_SERVER_ERROR => Some(Error::api("generic 500 error")),
            _ => None,
        })?;
        Ok(())
    }
}
