//! File endpoints

use super::{expect_success, Client};
use crate::error::{Error, Result};
use crate::http::read_json;
use crate::types::{FileId, Sample};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct SampleView {
    sample: Sample,
}

impl Client {
    /// Look up a sample by id, MD5 or SHA256
    pub async fn view_file(&self, file: &FileId) -> Result<Sample> {
        let path = format!("files/view/{}", file.path_segments());
        let outcome = self.http.execute(Method::GET, &path).await;
        let response = expect_success(outcome, |status| match status {
            StatusCode::NOT_FOUND => Some(Error::not_found("file")),
            StatusCode::BAD_REQUEST => Some(Error::api("invalid lookup term")),
            _ => None,
        })?;
        let view: SampleView = read_json(response).await?;
        Ok(view.sample)
    }
}
