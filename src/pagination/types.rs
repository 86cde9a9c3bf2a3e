//! Pagination types and traits
//!
//! Defines the page source abstraction and the bookkeeping shared by
//! the retry policy and the enumerator.

use crate::error::{Error, Result};
use crate::types::Task;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for task enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Records requested per page
    pub page_size: u32,
    /// Retries allowed per offset after a transient failure
    pub max_retries: u32,
    /// Fixed delay before each retry
    pub retry_delay: Duration,
    /// Text that marks an error message as a transient server failure
    pub transient_marker: String,
    /// Capacity of the channel used by [`TaskStream`](super::TaskStream)
    pub channel_capacity: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            transient_marker: "500".to_string(),
            channel_capacity: 32,
        }
    }
}

impl PaginationConfig {
    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set max retries per offset
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay between retries
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the transient error marker
    #[must_use]
    pub fn with_transient_marker(mut self, marker: impl Into<String>) -> Self {
        self.transient_marker = marker.into();
        self
    }

    /// Set the stream channel capacity
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Reject values the enumerator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::config("pagination.page_size must be greater than 0"));
        }
        if self.channel_capacity == 0 {
            return Err(Error::config(
                "pagination.channel_capacity must be greater than 0",
            ));
        }
        if self.transient_marker.is_empty() {
            return Err(Error::config("pagination.transient_marker must not be empty"));
        }
        Ok(())
    }
}

/// Cursor over the remote task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Number of records delivered so far, used as the next request offset
    pub offset: u32,
    /// Consecutive transient failures at the current offset
    pub attempt: u32,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Move past a fully delivered page
    pub fn advance(&mut self, delivered: u32) {
        self.offset = self.offset.saturating_add(delivered);
    }

    /// Count one more failed attempt at the current offset
    pub fn record_failure(&mut self) {
        self.attempt += 1;
    }

    /// Forget failures after a successful fetch
    pub fn reset_attempts(&mut self) {
        self.attempt = 0;
    }
}

/// Counters for one enumeration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Successful page fetches, including the final empty page
    pub pages_fetched: u64,
    /// Tasks handed to the consumer
    pub tasks_delivered: u64,
    /// Retries performed across all offsets
    pub retries: u64,
    /// Cursor position when the run ended
    pub final_offset: u32,
}

/// Fetches a single page of tasks.
///
/// Implementations must not retry; a page with no records means the
/// collection is exhausted.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch at most `limit` tasks starting at `offset`
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<Vec<Task>>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<Vec<Task>> {
        (**self).fetch_page(limit, offset).await
    }
}
