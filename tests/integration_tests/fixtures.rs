//! Test fixtures for integration tests

use std::path::Path;

/// Three posts and one reel, with a pass-through column
pub const MIXED_SHEET: &str = "\
type,description,direct_download_link,campaign
post,First post,https://example.com/1,spring
video,Launch reel,https://cdn.example.com/launch.mp4,spring
post,Second post,https://example.com/2,spring
post,Third post,https://example.com/3,summer
";

/// Two reels only
pub const REELS_SHEET: &str = "\
type,description,direct_download_link
video,Reel one,https://cdn.example.com/1.mp4
video,Reel two,https://cdn.example.com/2.mp4
";

/// Header without rows
pub const EMPTY_SHEET: &str = "type,description,direct_download_link\n";

/// Missing the link column
pub const MISSING_COLUMN_SHEET: &str = "\
type,description
post,No link here
";

/// Read an output sheet back as header + records
pub fn read_output(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let records = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, records)
}
