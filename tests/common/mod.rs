//! Common test utilities

use chrono::{DateTime, Local, TimeZone};
use pagecast::config::Config;
use std::path::Path;

pub const PAGE_ID: &str = "228482657011871";
pub const ACCESS_TOKEN: &str = "test-page-token";

/// Fixed "now" used by every test clock
pub fn fixed_now() -> DateTime<Local> {
    Local.timestamp_opt(1_767_600_000, 0).unwrap()
}

/// Configuration pointing at a mock Graph API
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::new(PAGE_ID, ACCESS_TOKEN);
    config.graph.base_url = base_url.to_string();
    config
}

/// Configuration pointing at a mock Graph API, with the input sheet written under `dir`
#[allow(dead_code)]
pub fn test_config_in(base_url: &str, dir: &Path, sheet: &str) -> Config {
    let mut config = test_config(base_url);
    config.files.input = dir.join("content_schedule.csv");
    config.files.output = dir.join("scheduled_output.csv");
    std::fs::write(&config.files.input, sheet).unwrap();
    config
}

/// Path of the feed endpoint on the mock server
#[allow(dead_code)]
pub fn feed_path() -> String {
    format!("/v17.0/{PAGE_ID}/feed")
}

/// Path of the videos endpoint on the mock server
#[allow(dead_code)]
pub fn videos_path() -> String {
    format!("/v17.0/{PAGE_ID}/videos")
}
