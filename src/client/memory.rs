//! Memory dump endpoints

use super::{expect_success, Client};
use crate::error::{Error, Result};
use crate::http::read_json;
use crate::types::TaskId;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct DumpFiles {
    #[serde(default)]
    dump_files: Vec<String>,
}

impl Client {
    /// Names of the memory dump files recorded for a task
    pub async fn list_memory_dumps(&self, task_id: TaskId) -> Result<Vec<String>> {
        let outcome = self
            .http
            .execute(Method::GET, &format!("memory/list/{task_id}"))
            .await;
        let response = expect_success(outcome, |status| {
            (status == StatusCode::NOT_FOUND).then(|| Error::not_found("memory dump"))
        })?;
        let dumps: DumpFiles = read_json(response).await?;
        Ok(dumps.dump_files)
    }
}
