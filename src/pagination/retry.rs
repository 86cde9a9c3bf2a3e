//! Retry policy for page fetches
//!
//! A pure decision function: given the error of a failed fetch and how many
//! times the current offset has already failed, say whether to wait and
//! try again or stop.

use super::types::PaginationConfig;
use crate::error::Error;
use std::time::Duration;

/// How a failed fetch is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Server-side 500-class error, worth another try
    Transient,
    /// Anything that will not get better by retrying
    Fatal,
    /// The enumeration was cancelled
    Cancelled,
}

/// What the enumerator should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then fetch the same offset again
    Retry {
        /// Time to wait before the next attempt
        delay: Duration,
    },
    /// Transient failure, but the retry budget for this offset is spent
    GiveUp,
    /// Stop with the error as is
    Fail,
}

/// Bounded fixed-delay retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
    transient_marker: String,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&PaginationConfig::default())
    }
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_retries: u32, delay: Duration, transient_marker: impl Into<String>) -> Self {
        Self {
            max_retries,
            delay,
            transient_marker: transient_marker.into(),
        }
    }

    /// Create a policy from pagination settings
    pub fn from_config(config: &PaginationConfig) -> Self {
        Self::new(
            config.max_retries,
            config.retry_delay,
            config.transient_marker.clone(),
        )
    }

    /// Retries allowed per offset
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before each retry
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Classify a fetch error.
    ///
    /// Only unexpected status codes are candidates for a retry, and only when
    /// their rendered message carries the transient marker
    /// (`bad response code: 500` with the default marker).
    pub fn classify(&self, error: &Error) -> Failure {
        match error {
            Error::Cancelled => Failure::Cancelled,
            Error::BadStatus { .. } if error.to_string().contains(&self.transient_marker) => {
                Failure::Transient
            }
            _ => Failure::Fatal,
        }
    }

    /// Decide what follows a failed fetch.
    ///
    /// `attempt` is the number of failures already retried at this offset.
    pub fn decide(&self, error: &Error, attempt: u32) -> RetryDecision {
        match self.classify(error) {
            Failure::Transient if attempt < self.max_retries => RetryDecision::Retry {
                delay: self.delay,
            },
            Failure::Transient => RetryDecision::GiveUp,
            Failure::Fatal | Failure::Cancelled => RetryDecision::Fail,
        }
    }
}
