//! Submitting planned items to the publishing API
//!
//! A [`Publisher`] takes one planned item at a time and hands back whatever the
//! remote side answered, as JSON. It never fails: an answer that cannot be
//! decoded, or a request that never got an answer, is turned into an error
//! payload so the caller can record it on the row and move on.
//!
//! # Error payloads
//!
//! ```json
//! { "error": "Failed to parse response: expected value at line 1 column 1", "status_code": 500 }
//! { "error": "Request failed: error sending request", "status_code": null }
//! ```

pub mod graph;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::fmt;

use crate::models::{Cadence, PlanEntry};

pub use graph::GraphPublisher;

/// One item to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Raw type tag from the sheet, used in logs
    pub content_type: String,
    /// Selects the endpoint
    pub cadence: Cadence,
    /// Post message or video description
    pub message: String,
    /// Post link or video file URL
    pub link: String,
    /// Desired publish time, before the lead-time floor is applied
    pub scheduled_at: DateTime<Local>,
}

impl PublishRequest {
    pub fn from_entry(entry: &PlanEntry) -> Self {
        Self {
            content_type: entry.item.content_type.clone(),
            cadence: entry.cadence,
            message: entry.item.description.clone(),
            link: entry.item.direct_download_link.clone(),
            scheduled_at: entry.scheduled_at,
        }
    }
}

/// Trait for publishing backends
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Submit one item and return the response payload verbatim
    async fn publish(&self, request: &PublishRequest) -> Value;
}

/// Payload recorded when a response body is not valid JSON
pub fn decode_failure(reason: impl fmt::Display, status_code: u16) -> Value {
    serde_json::json!({
        "error": format!("Failed to parse response: {reason}"),
        "status_code": status_code,
    })
}

/// Payload recorded when no response could be obtained
pub fn request_failure(err: &reqwest::Error) -> Value {
    serde_json::json!({
        "error": format!("Request failed: {err}"),
        "status_code": err.status().map(|s| s.as_u16()),
    })
}
