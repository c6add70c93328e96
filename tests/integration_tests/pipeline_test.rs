//! End-to-end pipeline tests
//!
//! Runs the whole sheet → plan → Graph API → sheet flow against a mock server.

use chrono::Duration;
use pagecast::pipeline::SchedulePipeline;
use pagecast::publisher::GraphPublisher;
use pagecast::scheduler::FixedClock;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{read_output, MIXED_SHEET, REELS_SHEET};
use crate::common::{feed_path, fixed_now, test_config_in, videos_path};

fn slot(minutes: i64) -> String {
    (fixed_now() + Duration::minutes(minutes))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn pipeline_for(config: &pagecast::config::Config) -> SchedulePipeline {
    let clock = Arc::new(FixedClock(fixed_now()));
    let publisher = GraphPublisher::new(config).unwrap().with_clock(clock.clone());
    SchedulePipeline::new(config, Arc::new(publisher)).with_clock(clock)
}

async fn mount_success(server: &MockServer, posts: u64, videos: u64) {
    Mock::given(method("POST"))
        .and(path(feed_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "post-1"})))
        .expect(posts)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(videos_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "video-1"})))
        .expect(videos)
        .mount(server)
        .await;
}

/// Three posts and one reel: reel takes the second slot, posts continue after it
#[tokio::test]
async fn test_full_run_mixed_sheet() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 3, 1).await;

    let dir = TempDir::new().unwrap();
    let config = test_config_in(&mock_server.uri(), dir.path(), MIXED_SHEET);

    let summary = pipeline_for(&config).run().await.unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.posts, 3);
    assert_eq!(summary.reels, 1);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.output, config.files.output);

    let (headers, rows) = read_output(&config.files.output);
    assert_eq!(
        headers,
        vec![
            "type",
            "description",
            "direct_download_link",
            "campaign",
            "scheduled_time",
            "response"
        ]
    );

    let descriptions: Vec<_> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["First post", "Launch reel", "Second post", "Third post"]
    );

    let times: Vec<_> = rows.iter().map(|r| r[4].clone()).collect();
    assert_eq!(times, vec![slot(10), slot(40), slot(160), slot(190)]);

    // Pass-through column survives in place
    assert_eq!(rows[3][3], "summer");

    let reel_response: serde_json::Value = serde_json::from_str(&rows[1][5]).unwrap();
    assert_eq!(reel_response["id"], "video-1");
    let post_response: serde_json::Value = serde_json::from_str(&rows[0][5]).unwrap();
    assert_eq!(post_response["id"], "post-1");
}

/// Reels only: second reel follows the first by the reel spacing
#[tokio::test]
async fn test_full_run_reels_only() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 0, 2).await;

    let dir = TempDir::new().unwrap();
    let config = test_config_in(&mock_server.uri(), dir.path(), REELS_SHEET);

    let summary = pipeline_for(&config).run().await.unwrap();
    assert_eq!(summary.reels, 2);
    assert_eq!(summary.posts, 0);

    let (_, rows) = read_output(&config.files.output);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r[0] == "video"));
    assert_eq!(rows[0][3], slot(10));
    assert_eq!(rows[1][3], slot(130));
}

/// Custom spacing from configuration is honoured end to end
#[tokio::test]
async fn test_full_run_custom_spacing() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 3, 1).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config_in(&mock_server.uri(), dir.path(), MIXED_SHEET);
    config.spacing.post_spacing_min = 20;
    config.spacing.reel_spacing_min = 60;
    config.spacing.min_schedule_delay_min = 15;

    pipeline_for(&config).run().await.unwrap();

    let (_, rows) = read_output(&config.files.output);
    let times: Vec<_> = rows.iter().map(|r| r[4].clone()).collect();
    assert_eq!(times, vec![slot(15), slot(35), slot(95), slot(115)]);
}

/// The sheet keeps the planned time while the request carries the time raised at call time
#[tokio::test]
async fn test_output_keeps_planned_time_when_floor_raises_request() {
    let mock_server = MockServer::start().await;
    let call_time = fixed_now() + Duration::hours(2);
    let raised = (call_time + Duration::minutes(10)).timestamp();

    Mock::given(method("POST"))
        .and(path(videos_path()))
        .and(body_string_contains(format!("scheduled_publish_time={raised}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "video-1"})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config_in(&mock_server.uri(), dir.path(), REELS_SHEET);

    // Plan at fixed_now, publish two hours later; both slots fall under the floor
    let publisher = GraphPublisher::new(&config)
        .unwrap()
        .with_clock(Arc::new(FixedClock(call_time)));
    let pipeline = SchedulePipeline::new(&config, Arc::new(publisher))
        .with_clock(Arc::new(FixedClock(fixed_now())));

    let summary = pipeline.run().await.unwrap();
    assert_eq!(summary.errors, 0);

    let (_, rows) = read_output(&config.files.output);
    assert_eq!(rows[0][3], slot(10));
    assert_eq!(rows[1][3], slot(130));
}
