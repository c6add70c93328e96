//! pagecast - Post and reel scheduler for Facebook pages
//!
//! Reads a sheet of content items, interleaves posts and reels on a shared
//! clock, schedules each one through the Graph API and writes the plan back
//! out with every response attached.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Content items, cadences and plan entries
//! - [`scheduler`] - Partitioning, interleaving and daily slot windows
//! - [`publisher`] - Graph API client
//! - [`storage`] - CSV input and output
//! - [`pipeline`] - The end-to-end run
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pagecast::config::Config;
//! use pagecast::pipeline::SchedulePipeline;
//! use pagecast::publisher::GraphPublisher;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let publisher = GraphPublisher::new(&config)?;
//!     let summary = SchedulePipeline::new(&config, Arc::new(publisher)).run().await?;
//!     println!("Check {} for full responses", summary.output.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod publisher;
pub mod scheduler;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Cadence, ContentItem, PlanEntry, ScheduledRow};
    pub use crate::pipeline::{RunSummary, SchedulePipeline};
    pub use crate::publisher::{GraphPublisher, PublishRequest, Publisher};
    pub use crate::scheduler::{Clock, DailyWindow, Interleaver, SystemClock};
}

// Direct re-exports for convenience
pub use models::{Cadence, ContentItem, PlanEntry, ScheduledRow};
