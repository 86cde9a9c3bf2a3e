//! Machine endpoints

use super::{expect_success, Client};
use crate::error::{Error, Result};
use crate::http::read_json;
use crate::types::Machine;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

#[derive(Deserialize)]
struct MachineList {
    #[serde(default)]
    machines: Vec<Machine>,
}

#[derive(Deserialize)]
struct MachineView {
    machine: Machine,
}

impl Client {
    /// All analysis machines known to the server
    pub async fn list_machines(&self) -> Result<Vec<Machine>> {
        let response = self
            .http
            .execute(Method::GET, "machines/list")
            .await
            .into_success()?;
        let list: MachineList = read_json(response).await?;
        Ok(list.machines)
    }

    /// Details of the machine called `name`
    pub async fn view_machine(&self, name: &str) -> Result<Machine> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::config(format!("invalid machine name: {name:?}")));
        }

        let outcome = self
            .http
            .execute(Method::GET, &format!("machines/view/{name}"))
            .await;
        let response = expect_success(outcome, |status| {
            (status == StatusCode::NOT_FOUND).then(|| Error::not_found("machine"))
        })?;
        let view: MachineView = read_json(response).await?;
        Ok(view.machine)
    }
}
