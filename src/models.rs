// Core data structures for pagecast

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Column holding the content type tag
pub const TYPE_COLUMN: &str = "type";
/// Column holding the post text / video description
pub const DESCRIPTION_COLUMN: &str = "description";
/// Column holding the link or video file URL
pub const LINK_COLUMN: &str = "direct_download_link";
/// Column appended with the planned publish time
pub const SCHEDULED_TIME_COLUMN: &str = "scheduled_time";
/// Column appended with the raw API response
pub const RESPONSE_COLUMN: &str = "response";

/// Type tag that routes an item to the reel cadence
pub const VIDEO_TAG: &str = "video";

/// Format used for the `scheduled_time` column
pub const SCHEDULED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Scheduling track an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Post,
    Reel,
}

impl Cadence {
    /// Classify a raw type tag. Only the exact tag `video` is a reel.
    pub fn from_type_tag(tag: &str) -> Self {
        if tag == VIDEO_TAG {
            Self::Reel
        } else {
            Self::Post
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Reel => "reel",
        }
    }

    /// The other cadence
    pub fn other(&self) -> Self {
        match self {
            Self::Post => Self::Reel,
            Self::Reel => Self::Post,
        }
    }

    /// Create from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "post" | "posts" => Some(Self::Post),
            "reel" | "reels" | "video" => Some(Self::Reel),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown cadence '{s}' (expected reel or post)"))
    }
}

/// One row of the input sheet
///
/// The three columns the scheduler needs are typed fields. Any other column
/// is carried through untouched in `extra`, and `columns` remembers the
/// header order so the output sheet can reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Raw `type` column
    pub content_type: String,
    /// Post message or video description
    pub description: String,
    /// Post link or video file URL
    pub direct_download_link: String,
    /// Pass-through columns in input order
    pub extra: Vec<(String, String)>,
    /// Header order of the sheet this row came from
    pub columns: Arc<[String]>,
}

impl ContentItem {
    /// Create an item with only the required columns
    pub fn new(
        content_type: impl Into<String>,
        description: impl Into<String>,
        direct_download_link: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            description: description.into(),
            direct_download_link: direct_download_link.into(),
            extra: Vec::new(),
            columns: Arc::from(vec![
                TYPE_COLUMN.to_string(),
                DESCRIPTION_COLUMN.to_string(),
                LINK_COLUMN.to_string(),
            ]),
        }
    }

    /// Cadence this item is scheduled on
    pub fn cadence(&self) -> Cadence {
        Cadence::from_type_tag(&self.content_type)
    }

    /// Value of a named column, typed or pass-through
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            TYPE_COLUMN => Some(&self.content_type),
            DESCRIPTION_COLUMN => Some(&self.description),
            LINK_COLUMN => Some(&self.direct_download_link),
            _ => self
                .extra
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.as_str()),
        }
    }

    /// Fields in header order
    pub fn fields(&self) -> Vec<(&str, &str)> {
        self.columns
            .iter()
            .map(|name| (name.as_str(), self.get(name).unwrap_or_default()))
            .collect()
    }
}

/// A content item placed on the publishing timeline
#[derive(Debug, Clone)]
pub struct PlanEntry {
    /// Position in the plan (emission order)
    pub position: usize,
    /// Track the item was scheduled on
    pub cadence: Cadence,
    /// Planned publish time
    pub scheduled_at: DateTime<Local>,
    /// The item itself
    pub item: ContentItem,
}

impl PlanEntry {
    /// Planned time formatted for the output sheet
    pub fn scheduled_time(&self) -> String {
        self.scheduled_at.format(SCHEDULED_TIME_FORMAT).to_string()
    }
}

/// A planned item annotated with the API response, ready for the output sheet
#[derive(Debug, Clone)]
pub struct ScheduledRow {
    pub item: ContentItem,
    /// Planned time as `YYYY-MM-DD HH:MM:SS`
    pub scheduled_time: String,
    /// Decoded API payload or the structured error that replaced it
    pub response: serde_json::Value,
}

impl ScheduledRow {
    /// Annotate a plan entry with its response
    pub fn new(entry: PlanEntry, response: serde_json::Value) -> Self {
        Self {
            scheduled_time: entry.scheduled_time(),
            item: entry.item,
            response,
        }
    }

    /// Column names of this row: item columns, then the two annotations
    ///
    /// A sheet that already carries `scheduled_time` or `response` (a previous
    /// output fed back in) keeps those columns in place.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = self.item.columns.to_vec();
        for column in [SCHEDULED_TIME_COLUMN, RESPONSE_COLUMN] {
            if !names.iter().any(|name| name == column) {
                names.push(column.to_string());
            }
        }
        names
    }

    /// Cell values aligned with [`Self::column_names`]
    pub fn values(&self) -> Result<Vec<String>, serde_json::Error> {
        self.column_names()
            .iter()
            .map(|name| match name.as_str() {
                SCHEDULED_TIME_COLUMN => Ok(self.scheduled_time.clone()),
                RESPONSE_COLUMN => serde_json::to_string(&self.response),
                other => Ok(self.item.get(other).unwrap_or_default().to_string()),
            })
            .collect()
    }

    /// Whether the recorded response is an error payload
    pub fn is_error(&self) -> bool {
        self.response.get("error").is_some()
    }
}
