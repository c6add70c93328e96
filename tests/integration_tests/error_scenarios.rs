//! Error scenario integration tests
//!
//! Tests the failure modes of a run:
//! 1. Undecodable API responses (recorded, run continues)
//! 2. Empty input (fatal, nothing written)
//! 3. Missing input file or column (fatal)
//! 4. Unreachable API host (recorded, run continues)

use pagecast::error::Error;
use pagecast::pipeline::SchedulePipeline;
use pagecast::publisher::GraphPublisher;
use pagecast::scheduler::FixedClock;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{read_output, EMPTY_SHEET, MISSING_COLUMN_SHEET, MIXED_SHEET};
use crate::common::{feed_path, fixed_now, test_config_in, videos_path};

fn pipeline_for(config: &pagecast::config::Config) -> SchedulePipeline {
    let clock = Arc::new(FixedClock(fixed_now()));
    let publisher = GraphPublisher::new(config).unwrap().with_clock(clock.clone());
    SchedulePipeline::new(config, Arc::new(publisher)).with_clock(clock)
}

// ============================================================================
// Response Errors
// ============================================================================

#[tokio::test]
async fn test_undecodable_response_recorded_and_run_continues() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(videos_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(feed_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "ok"})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config_in(&mock_server.uri(), dir.path(), MIXED_SHEET);

    let summary = pipeline_for(&config).run().await.unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.errors, 1);

    let (_, rows) = read_output(&config.files.output);
    let reel: serde_json::Value = serde_json::from_str(&rows[1][5]).unwrap();
    assert_eq!(reel["status_code"], 500);
    assert!(reel["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse response:"));

    // Rows after the failure were still published
    let last: serde_json::Value = serde_json::from_str(&rows[3][5]).unwrap();
    assert_eq!(last["id"], "ok");
}

#[tokio::test]
async fn test_unreachable_api_recorded() {
    let dir = TempDir::new().unwrap();
    // Nothing listens on the discard port
    let config = test_config_in("http://127.0.0.1:9", dir.path(), MIXED_SHEET);

    let summary = pipeline_for(&config).run().await.unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.errors, 4);

    let (_, rows) = read_output(&config.files.output);
    let first: serde_json::Value = serde_json::from_str(&rows[0][5]).unwrap();
    assert!(first["status_code"].is_null());
}

// ============================================================================
// Fatal Errors
// ============================================================================

#[tokio::test]
async fn test_empty_sheet_aborts_before_writing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config_in(&mock_server.uri(), dir.path(), EMPTY_SHEET);

    let result = pipeline_for(&config).run().await;
    assert!(matches!(result, Err(Error::EmptyPlan)));
    assert!(!config.files.output.exists());
}

#[tokio::test]
async fn test_missing_input_file_is_fatal() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config_in(&mock_server.uri(), dir.path(), EMPTY_SHEET);
    config.files.input = dir.path().join("does_not_exist.csv");

    let result = pipeline_for(&config).run().await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::InputOpen { .. }));
    assert_eq!(err.category(), pagecast::error::ErrorCategory::Input);
}

#[tokio::test]
async fn test_missing_column_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config_in(&mock_server.uri(), dir.path(), MISSING_COLUMN_SHEET);

    let result = pipeline_for(&config).run().await;
    assert!(matches!(
        result,
        Err(Error::MissingColumn { ref column }) if column == "direct_download_link"
    ));
    assert!(!config.files.output.exists());
}
