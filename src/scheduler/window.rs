//! Evenly spaced daily slots
//!
//! Spreads `count` slots across a clock window, first slot at the start and
//! last slot at the end, alternating cadences. A window whose end is not after
//! its start runs over midnight into the next day.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::models::Cadence;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse a 24h `HH:MM` clock value
pub fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| Error::invalid_time(value))
}

/// Window to spread slots across
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Cadence of the first slot
    pub start_with: Cadence,
}

impl DailyWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            start_with: Cadence::Reel,
        }
    }

    /// Parse both ends from `HH:MM`
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_hhmm(start)?, parse_hhmm(end)?))
    }

    pub fn with_start_with(mut self, cadence: Cadence) -> Self {
        self.start_with = cadence;
        self
    }

    /// Window length in minutes; a non-positive span wraps to the next day
    pub fn span_minutes(&self) -> i64 {
        let start = minute_of_day(self.start);
        let mut end = minute_of_day(self.end);
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }

    /// Generate `count` slots from start to end inclusive
    pub fn slots(&self, count: usize) -> Vec<WindowSlot> {
        if count == 0 {
            return Vec::new();
        }

        let start = minute_of_day(self.start) as f64;
        let step = if count == 1 {
            0.0
        } else {
            self.span_minutes() as f64 / (count - 1) as f64
        };

        (0..count)
            .map(|i| {
                let cadence = if i % 2 == 0 {
                    self.start_with
                } else {
                    self.start_with.other()
                };
                let minutes = (start + i as f64 * step).round() as i64;
                WindowSlot {
                    index: i + 1,
                    cadence,
                    time: time_from_minutes(minutes),
                }
            })
            .collect()
    }
}

/// One generated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSlot {
    /// 1-based slot number
    pub index: usize,
    #[serde(rename = "type")]
    pub cadence: Cadence,
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
}

impl WindowSlot {
    /// Time as `HH:MM`
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

fn time_from_minutes(minutes: i64) -> NaiveTime {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    // rem_euclid keeps this within 0..1440, so both parts are in range
    NaiveTime::from_hms_opt((wrapped / 60) as u32, (wrapped % 60) as u32, 0)
        .unwrap_or(NaiveTime::MIN)
}
