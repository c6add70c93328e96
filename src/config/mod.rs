//! Configuration management for pagecast
//!
//! Configuration is loaded once at process start, either from a TOML file or
//! from `PAGECAST_*` environment variables, and handed to each component when
//! it is constructed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Graph API host
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Default Graph API version
pub const DEFAULT_GRAPH_VERSION: &str = "v17.0";

/// Upper bound for any spacing value: one year in minutes
pub const MAX_SPACING_MIN: i64 = 366 * 24 * 60;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target page and its credential
    pub page: PageConfig,

    /// Graph API endpoint settings
    #[serde(default)]
    pub graph: GraphConfig,

    /// Input and output sheets
    #[serde(default)]
    pub files: FilesConfig,

    /// Spacing rules
    #[serde(default)]
    pub spacing: SpacingConfig,
}

/// Facebook page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Numeric page identifier
    pub page_id: String,

    /// Page access token
    pub access_token: String,
}

/// Graph API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Scheme and host, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional request timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Input/output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Sheet of content items to schedule
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Sheet written with schedule times and responses
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Spacing rules, all in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingConfig {
    /// Clock advance after each post
    #[serde(default = "default_post_spacing")]
    pub post_spacing_min: i64,

    /// Clock advance after each reel
    #[serde(default = "default_reel_spacing")]
    pub reel_spacing_min: i64,

    /// Minimum lead time between now and any publish time
    #[serde(default = "default_min_delay")]
    pub min_schedule_delay_min: i64,
}

fn default_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_version() -> String {
    DEFAULT_GRAPH_VERSION.to_string()
}

fn default_input() -> PathBuf {
    PathBuf::from("content_schedule.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("scheduled_output.csv")
}

fn default_post_spacing() -> i64 {
    30
}

fn default_reel_spacing() -> i64 {
    120
}

// Facebook rejects scheduled_publish_time values less than 10 minutes out
fn default_min_delay() -> i64 {
    10
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_version(),
            request_timeout_secs: None,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            post_spacing_min: default_post_spacing(),
            reel_spacing_min: default_reel_spacing(),
            min_schedule_delay_min: default_min_delay(),
        }
    }
}

impl SpacingConfig {
    /// Clock advance after each post
    pub fn post_spacing(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.post_spacing_min)
    }

    /// Clock advance after each reel
    pub fn reel_spacing(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.reel_spacing_min)
    }

    /// Minimum lead time
    pub fn min_schedule_delay(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.min_schedule_delay_min)
    }
}

impl Config {
    /// Build a configuration for a page, with defaults everywhere else
    pub fn new(page_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            page: PageConfig {
                page_id: page_id.into(),
                access_token: access_token.into(),
            },
            graph: GraphConfig::default(),
            files: FilesConfig::default(),
            spacing: SpacingConfig::default(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let page_id = std::env::var("PAGECAST_PAGE_ID")
            .context("PAGECAST_PAGE_ID is not set")?;

        let access_token = std::env::var("PAGECAST_ACCESS_TOKEN")
            .context("PAGECAST_ACCESS_TOKEN is not set")?;

        let base_url =
            std::env::var("PAGECAST_GRAPH_BASE_URL").unwrap_or_else(|_| default_base_url());

        let version = std::env::var("PAGECAST_GRAPH_VERSION").unwrap_or_else(|_| default_version());

        let request_timeout_secs = match std::env::var("PAGECAST_REQUEST_TIMEOUT") {
            Ok(value) => Some(value.trim().parse::<u64>().with_context(|| {
                format!("PAGECAST_REQUEST_TIMEOUT must be a whole number of seconds, got '{value}'")
            })?),
            Err(_) => None,
        };

        let input = std::env::var("PAGECAST_INPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_input());

        let output = std::env::var("PAGECAST_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_output());

        let post_spacing_min = env_minutes("PAGECAST_POST_SPACING_MIN", default_post_spacing())?;
        let reel_spacing_min = env_minutes("PAGECAST_REEL_SPACING_MIN", default_reel_spacing())?;
        let min_schedule_delay_min =
            env_minutes("PAGECAST_MIN_SCHEDULE_DELAY_MIN", default_min_delay())?;

        Ok(Self {
            page: PageConfig {
                page_id,
                access_token,
            },
            graph: GraphConfig {
                base_url,
                version,
                request_timeout_secs,
            },
            files: FilesConfig { input, output },
            spacing: SpacingConfig {
                post_spacing_min,
                reel_spacing_min,
                min_schedule_delay_min,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise from the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.page.page_id.trim().is_empty() {
            anyhow::bail!("page_id must not be empty");
        }

        if self.page.access_token.trim().is_empty() {
            anyhow::bail!("access_token must not be empty");
        }

        url::Url::parse(&self.graph.base_url)
            .with_context(|| format!("Invalid graph base_url: {}", self.graph.base_url))?;

        if self.graph.version.trim().is_empty() {
            anyhow::bail!("graph version must not be empty");
        }

        if self.graph.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.spacing.post_spacing_min <= 0 || self.spacing.reel_spacing_min <= 0 {
            anyhow::bail!("spacing intervals must be positive");
        }

        if self.spacing.min_schedule_delay_min < 0 {
            anyhow::bail!("min_schedule_delay_min must not be negative");
        }

        let spacing = [
            ("post_spacing_min", self.spacing.post_spacing_min),
            ("reel_spacing_min", self.spacing.reel_spacing_min),
            ("min_schedule_delay_min", self.spacing.min_schedule_delay_min),
        ];
        for (name, minutes) in spacing {
            if minutes > MAX_SPACING_MIN {
                anyhow::bail!("{name} must be at most {MAX_SPACING_MIN} minutes, got {minutes}");
            }
        }

        Ok(())
    }

    /// Get request timeout as Duration, if one is configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.graph.request_timeout_secs.map(Duration::from_secs)
    }
}

fn env_minutes(name: &str, default: i64) -> Result<i64> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .with_context(|| format!("{name} must be a whole number of minutes, got '{value}'")),
        Err(_) => Ok(default),
    }
}
