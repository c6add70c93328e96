//! Publish scheduling
//!
//! # Overview
//!
//! Content items run on two cadences: standalone posts and video reels. The
//! scheduler splits a sheet into those cadences and lays them out on one
//! timeline with fixed spacing per cadence.
//!
//! # Modules
//!
//! - [`interleave`] - Partitioning and the shared-clock interleaver
//! - [`window`] - Evenly spaced slots across a daily window
//! - [`clock`] - Source of "now"
//!
//! # Spacing Settings
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `post_spacing_min` | 30 | Clock advance after each post |
//! | `reel_spacing_min` | 120 | Clock advance after each reel |
//! | `min_schedule_delay_min` | 10 | Lead time before the first slot and floor at publish time |
//!
//! # Quick Start
//!
//! ```ignore
//! use pagecast::config::SpacingConfig;
//! use pagecast::scheduler::{partition, Interleaver};
//! use chrono::Local;
//!
//! let plan = Interleaver::new(SpacingConfig::default()).plan(partition(items), Local::now());
//! for entry in &plan {
//!     println!("{} {} {}", entry.position, entry.cadence, entry.scheduled_time());
//! }
//! ```

pub mod clock;
pub mod interleave;
pub mod window;

// Re-export main types
pub use clock::{Clock, FixedClock, SystemClock};
pub use interleave::{partition, Interleaver, Partition};
pub use window::{parse_hhmm, DailyWindow, WindowSlot};
