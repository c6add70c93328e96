//! End-to-end scheduling run
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Input CSV  │────▶│  Partition  │────▶│ Interleaver │────▶│  Publisher  │────▶│ Output CSV  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                              one request per
//!                                                              entry, in order
//! ```
//!
//! Everything runs in a single pass on one task. Each request is awaited
//! before the next one is sent.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pagecast::config::Config;
//! use pagecast::pipeline::SchedulePipeline;
//! use pagecast::publisher::GraphPublisher;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let publisher = GraphPublisher::new(&config)?;
//! let pipeline = SchedulePipeline::new(&config, Arc::new(publisher));
//!
//! let summary = pipeline.run().await?;
//! println!("Scheduled {} items", summary.total);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, FilesConfig, SpacingConfig};
use crate::error::{Error, Result};
use crate::models::{Cadence, ContentItem, PlanEntry, ScheduledRow};
use crate::publisher::{PublishRequest, Publisher};
use crate::scheduler::clock::{Clock, SystemClock};
use crate::scheduler::interleave::{partition, Interleaver};
use crate::storage;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written
    pub total: usize,
    /// Rows scheduled on the post cadence
    pub posts: usize,
    /// Rows scheduled on the reel cadence
    pub reels: usize,
    /// Rows whose recorded response is an error payload
    pub errors: usize,
    /// Where the output sheet was written
    pub output: PathBuf,
}

/// Read the input sheet and build its plan anchored at `clock`
///
/// Needs no publisher or credentials; nothing is sent.
pub fn plan_sheet(
    files: &FilesConfig,
    spacing: SpacingConfig,
    clock: &dyn Clock,
) -> Result<Vec<PlanEntry>> {
    let items = storage::read_content(&files.input)?;
    Ok(plan_with(&Interleaver::new(spacing), items, clock))
}

fn plan_with(interleaver: &Interleaver, items: Vec<ContentItem>, clock: &dyn Clock) -> Vec<PlanEntry> {
    let partition = partition(items);
    tracing::info!(
        posts = partition.posts.len(),
        reels = partition.reels.len(),
        "Partitioned content"
    );
    interleaver.plan(partition, clock.now())
}

/// Reads a sheet, plans it, publishes every entry and records the results
pub struct SchedulePipeline {
    files: FilesConfig,
    interleaver: Interleaver,
    publisher: Arc<dyn Publisher>,
    clock: Arc<dyn Clock>,
}

impl SchedulePipeline {
    pub fn new(config: &Config, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            files: config.files.clone(),
            interleaver: Interleaver::new(config.spacing),
            publisher,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to anchor the plan
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Read the input sheet and build the plan, without publishing anything
    pub fn plan(&self) -> Result<Vec<PlanEntry>> {
        let items = storage::read_content(&self.files.input)?;
        Ok(self.plan_items(items))
    }

    /// Build the plan for already loaded items
    pub fn plan_items(&self, items: Vec<ContentItem>) -> Vec<PlanEntry> {
        plan_with(&self.interleaver, items, self.clock.as_ref())
    }

    /// Publish every entry in plan order and annotate it with its response
    pub async fn publish_plan(&self, plan: Vec<PlanEntry>) -> Vec<ScheduledRow> {
        let mut rows = Vec::with_capacity(plan.len());
        for entry in plan {
            let request = PublishRequest::from_entry(&entry);
            let response = self.publisher.publish(&request).await;
            rows.push(ScheduledRow::new(entry, response));
        }
        rows
    }

    /// Run the whole pipeline
    ///
    /// # Errors
    ///
    /// Fails when the input sheet cannot be read, when there is nothing to
    /// schedule (before any request is sent or any file is created), and
    /// when the output sheet cannot be written. Individual publish failures
    /// are recorded on their rows instead.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!(
            input = %self.files.input.display(),
            publisher = self.publisher.name(),
            "Starting scheduling run"
        );

        let plan = self.plan()?;
        if plan.is_empty() {
            return Err(Error::EmptyPlan);
        }

        let posts = plan.iter().filter(|e| e.cadence == Cadence::Post).count();
        let reels = plan.len() - posts;

        let rows = self.publish_plan(plan).await;
        let errors = rows.iter().filter(|row| row.is_error()).count();
        if errors > 0 {
            tracing::warn!(errors, "Some items were not accepted, see the response column");
        }

        storage::write_scheduled(&self.files.output, &rows)?;

        Ok(RunSummary {
            total: rows.len(),
            posts,
            reels,
            errors,
            output: self.files.output.clone(),
        })
    }
}
