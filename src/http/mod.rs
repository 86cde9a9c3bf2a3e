//! HTTP module
//!
//! The low-level request executor every endpoint goes through.
//!
//! # Features
//!
//! - **Bearer Authentication**: `Authorization: Bearer <api_key>` on every request
//! - **Outcome Classification**: success, not authorized, other status, transport failure
//! - **Shared Connection Pool**: one `reqwest::Client`, cheap to clone
//!
//! The executor never retries. Retrying is left to the caller (see
//! [`pagination`](crate::pagination)).

mod client;

pub use client::{HttpClient, ResponseOutcome, MAX_ERROR_BODY_BYTES};
pub(crate) use client::{read_error_body, read_json};

#[cfg(test)]
mod tests;
