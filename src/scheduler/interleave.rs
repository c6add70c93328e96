//! Post/reel partitioning and schedule interleaving
//!
//! Items are split into two cadences and merged back into one plan that
//! alternates a post slot and a reel slot per index. A single clock is shared
//! by both cadences: each scheduled item takes the current clock value and
//! then advances it by its own cadence's spacing.
//!
//! ```text
//! posts: P0 P1 P2        clock: t0 ──P0──▶ t0+30 ──R0──▶ t0+150 ──P1──▶ t0+180 ...
//! reels: R0
//! plan:  P0@t0  R0@t0+30  P1@t0+150  P2@t0+180
//! ```
//!
//! Slots are not aligned per cadence: reel `i` always lands after post `i`
//! has taken its slot and pushed the clock forward.

use chrono::{DateTime, Local};

use crate::config::SpacingConfig;
use crate::models::{Cadence, ContentItem, PlanEntry};

/// Items split by cadence, each in input order
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub posts: Vec<ContentItem>,
    pub reels: Vec<ContentItem>,
}

impl Partition {
    /// Total number of items across both cadences
    pub fn len(&self) -> usize {
        self.posts.len() + self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.reels.is_empty()
    }
}

/// Split items into posts and reels, preserving relative order
pub fn partition(items: Vec<ContentItem>) -> Partition {
    let (reels, posts): (Vec<_>, Vec<_>) = items
        .into_iter()
        .partition(|item| item.cadence() == Cadence::Reel);

    Partition { posts, reels }
}

/// Builds publish plans from a partition
#[derive(Debug, Clone, Copy)]
pub struct Interleaver {
    spacing: SpacingConfig,
}

impl Interleaver {
    pub fn new(spacing: SpacingConfig) -> Self {
        Self { spacing }
    }

    /// First slot of a plan built at `now`
    pub fn start_time(&self, now: DateTime<Local>) -> DateTime<Local> {
        now + self.spacing.min_schedule_delay()
    }

    /// Interleave both cadences into a single plan starting at `now` plus lead time
    pub fn plan(&self, partition: Partition, now: DateTime<Local>) -> Vec<PlanEntry> {
        let total = partition.len();
        let mut plan = Vec::with_capacity(total);
        let mut clock = self.start_time(now);

        let mut posts = partition.posts.into_iter();
        let mut reels = partition.reels.into_iter();

        loop {
            let post = posts.next();
            let reel = reels.next();
            if post.is_none() && reel.is_none() {
                break;
            }

            if let Some(item) = post {
                plan.push(PlanEntry {
                    position: plan.len(),
                    cadence: Cadence::Post,
                    scheduled_at: clock,
                    item,
                });
                clock += self.spacing.post_spacing();
            }

            if let Some(item) = reel {
                plan.push(PlanEntry {
                    position: plan.len(),
                    cadence: Cadence::Reel,
                    scheduled_at: clock,
                    item,
                });
                clock += self.spacing.reel_spacing();
            }
        }

        tracing::debug!(
            entries = plan.len(),
            first = ?plan.first().map(|e| e.scheduled_at),
            last = ?plan.last().map(|e| e.scheduled_at),
            "Built publish plan"
        );

        debug_assert_eq!(plan.len(), total);
        plan
    }
}
