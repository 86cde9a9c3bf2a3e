//! Pagination module
//!
//! Streams the complete task list through the fixed-size
//! `tasks/list/<limit>/<offset>` endpoint.
//!
//! # Overview
//!
//! - [`PageSource`] - fetches a single page; implemented by [`Client`](crate::Client)
//! - [`RetryPolicy`] - decides whether a failed fetch is retried
//! - [`TaskEnumerator`] - drives the page source and publishes tasks to a channel
//! - [`TaskStream`] - an enumerator running on a background task, consumed as a `Stream`
//!
//! Pages are fetched strictly one after another. An empty page ends the
//! enumeration; the offset advances only past pages that were fully
//! delivered to the consumer.

mod enumerator;
mod retry;
mod types;

pub use enumerator::{TaskEnumerator, TaskStream};
pub use retry::{Failure, RetryDecision, RetryPolicy};
pub use types::{EnumerationStats, PageSource, PaginationConfig, PaginationState};
