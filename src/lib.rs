// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Cuckoo API
//!
//! An async client for the Cuckoo sandbox REST API.
//!
//! ## Features
//!
//! - **Typed endpoints**: tasks, machines, samples, memory dumps, server and VPN status
//! - **Full task listing**: walks `tasks/list` page by page and streams every task
//! - **Retries**: transient server errors are retried with a fixed delay, per page
//! - **Cancellation**: a `CancellationToken` stops a listing at any point
//! - **Backpressure**: tasks flow through a bounded channel to the consumer
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cuckoo_api::{Client, ClientConfig, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::new("http://localhost:8090", "s3cret"))?;
//!     client.check_auth().await?;
//!
//!     let cancel = CancellationToken::new();
//!     let mut tasks = client.stream_all_tasks(&cancel);
//!     while let Some(task) = tasks.next_task().await {
//!         println!("{} {} {}", task.id, task.status, task.target);
//!     }
//!     let stats = tasks.finish().await?;
//!     println!("{} tasks", stats.tasks_delivered);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Client                              │
//! │  list_all_tasks / stream_all_tasks     single-shot endpoints │
//! └──────────────────────────────────────────────────────────────┘
//!            │                                      │
//! ┌──────────┴───────────┐                          │
//! │   TaskEnumerator     │── RetryPolicy            │
//! │   (state machine)    │                          │
//! └──────────┬───────────┘                          │
//!            │ PageSource::fetch_page               │
//! ┌──────────┴──────────────────────────────────────┴────────────┐
//! │                 HttpClient::execute → ResponseOutcome        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Resource types returned by the API
pub mod types;

/// Client and pagination configuration
pub mod config;

/// Authenticated request executor
pub mod http;

/// Paginated task enumeration
pub mod pagination;

/// API client and endpoints
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::Client;
pub use config::ClientConfig;
pub use pagination::{EnumerationStats, PageSource, PaginationConfig, TaskEnumerator, TaskStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
