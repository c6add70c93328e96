//! Facebook Graph API publisher
//!
//! Posts go to `/{page_id}/feed`, videos to `/{page_id}/videos`. Both are sent
//! unpublished with a `scheduled_publish_time`, as form fields.
//!
//! The publish time is raised to at least `now + min_schedule_delay_min`
//! right before each request, using the clock at call time rather than the
//! clock the plan was built with.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;

use super::{decode_failure, request_failure, PublishRequest, Publisher};
use crate::config::{Config, SpacingConfig};
use crate::error::Result;
use crate::models::{Cadence, SCHEDULED_TIME_FORMAT};
use crate::scheduler::clock::{Clock, SystemClock};

/// Graph API publisher for a single page
///
/// # Example
///
/// ```rust,ignore
/// use pagecast::config::Config;
/// use pagecast::publisher::{GraphPublisher, Publisher, PublishRequest};
///
/// let config = Config::from_env()?;
/// let publisher = GraphPublisher::new(&config)?;
/// let response = publisher.publish(&request).await;
/// println!("{response}");
/// ```
pub struct GraphPublisher {
    client: Client,
    base_url: String,
    version: String,
    page_id: String,
    access_token: String,
    spacing: SpacingConfig,
    clock: Arc<dyn Clock>,
}

impl GraphPublisher {
    /// Create a publisher from configuration, using the system clock
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.graph.base_url.trim_end_matches('/').to_string(),
            version: config.graph.version.clone(),
            page_id: config.page.page_id.clone(),
            access_token: config.page.access_token.clone(),
            spacing: config.spacing,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for the lead-time floor
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Endpoint URL for a cadence
    pub fn endpoint(&self, cadence: Cadence) -> String {
        let edge = match cadence {
            Cadence::Reel => "videos",
            Cadence::Post => "feed",
        };
        format!("{}/{}/{}/{edge}", self.base_url, self.version, self.page_id)
    }

    /// Desired time raised to the lead-time floor as of now
    pub fn effective_time(&self, desired: DateTime<Local>) -> DateTime<Local> {
        let floor = self.clock.now() + self.spacing.min_schedule_delay();
        desired.max(floor)
    }

    /// Form fields for a request
    fn build_form(&self, request: &PublishRequest, timestamp: i64) -> Vec<(&'static str, String)> {
        let (text_field, link_field) = match request.cadence {
            Cadence::Reel => ("description", "file_url"),
            Cadence::Post => ("message", "link"),
        };

        vec![
            (text_field, request.message.clone()),
            (link_field, request.link.clone()),
            ("published", "false".to_string()),
            ("scheduled_publish_time", timestamp.to_string()),
            ("access_token", self.access_token.clone()),
        ]
    }

    /// Decode the body as JSON, or describe why it could not be
    async fn decode_response(response: Response) -> Value {
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => serde_json::from_slice(&body).unwrap_or_else(|e| decode_failure(e, status)),
            Err(e) => decode_failure(e, status),
        }
    }
}

#[async_trait]
impl Publisher for GraphPublisher {
    fn name(&self) -> &str {
        "graph"
    }

    async fn publish(&self, request: &PublishRequest) -> Value {
        let publish_at = self.effective_time(request.scheduled_at);
        if publish_at != request.scheduled_at {
            tracing::debug!(
                planned = %request.scheduled_at.format(SCHEDULED_TIME_FORMAT),
                effective = %publish_at.format(SCHEDULED_TIME_FORMAT),
                "Raised publish time to lead-time floor"
            );
        }

        let url = self.endpoint(request.cadence);
        let form = self.build_form(request, publish_at.timestamp());

        let result = match self.client.post(&url).form(&form).send().await {
            Ok(response) => Self::decode_response(response).await,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Graph API request failed");
                request_failure(&e)
            }
        };

        tracing::info!(
            content_type = %request.content_type,
            cadence = %request.cadence,
            "Scheduling {} at {}: {}",
            request.content_type,
            publish_at.format(SCHEDULED_TIME_FORMAT),
            result
        );

        result
    }
}
