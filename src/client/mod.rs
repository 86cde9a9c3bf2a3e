//! Cuckoo API client
//!
//! [`Client`] bundles the authenticated HTTP executor with the pagination
//! settings and exposes one method per REST endpoint. Endpoint methods live
//! in per-resource files:
//!
//! - `tasks` - list, view, reschedule, delete, re-report and reboot tasks
//! - `machines` - analysis machine inventory
//! - `cuckoo` - server status and shutdown
//! - `files` - sample metadata
//! - `memory` - memory dump listings
//! - `vpn` - VPN status

mod cuckoo;
mod files;
mod machines;
mod memory;
mod tasks;
mod vpn;

pub use tasks::DEFAULT_RESCHEDULE_PRIORITY;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, ResponseOutcome};
use crate::pagination::{
    EnumerationStats, PageSource, PaginationConfig, TaskEnumerator, TaskStream,
};
use crate::types::Task;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Client for the Cuckoo REST API
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    pagination: PaginationConfig,
}

impl Client {
    /// Create a client, validating the configuration first
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http,
            pagination: config.pagination,
        })
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    ///
    /// The timeout and user agent of `config` are ignored in favour of
    /// whatever `client` was built with.
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_client(&config, client);
        Ok(Self {
            http,
            pagination: config.pagination,
        })
    }

    /// The underlying request executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Task enumeration settings
    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    /// Returns an error if the API key is not accepted.
    ///
    /// Lists a single task under the hood.
    pub async fn check_auth(&self) -> Result<()> {
        self.list_tasks(1, 0).await.map(|_| ())
    }

    /// An enumerator over every task, using this client's pagination settings
    pub fn task_enumerator(&self) -> TaskEnumerator<Client> {
        TaskEnumerator::new(self.clone(), &self.pagination)
    }

    /// Send every task on the server to `sink`, page by page.
    ///
    /// `sink` is closed when this returns, whether the listing completed,
    /// failed or was cancelled.
    pub async fn list_all_tasks(
        &self,
        cancel: CancellationToken,
        sink: mpsc::Sender<Task>,
    ) -> Result<EnumerationStats> {
        self.task_enumerator().run(cancel, sink).await
    }

    /// Enumerate every task on a background task and consume them as a stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn stream_all_tasks(&self, cancel: &CancellationToken) -> TaskStream {
        self.task_enumerator()
            .spawn(cancel, self.pagination.channel_capacity)
    }
}

#[async_trait]
impl PageSource for Client {
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<Vec<Task>> {
        self.list_tasks(limit, offset).await
    }
}

/// Keep the 200 response, letting `on_status` map specific status codes
/// to endpoint errors. Unclaimed codes become [`Error::BadStatus`].
fn expect_success(
    outcome: ResponseOutcome,
    on_status: impl FnOnce(StatusCode) -> Option<Error>,
) -> Result<Response> {
    match outcome {
        ResponseOutcome::Success(response) => Ok(response),
        ResponseOutcome::Unauthorized(_) => Err(Error::NotAuthorized),
        ResponseOutcome::Status(response) => {
            let status = response.status();
            Err(on_status(status).unwrap_or_else(|| Error::bad_status(status.as_u16())))
        }
        ResponseOutcome::Transport(e) => Err(Error::Http(e)),
    }
}
