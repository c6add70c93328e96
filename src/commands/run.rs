use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use pagecast::config::Config;
use pagecast::pipeline::SchedulePipeline;
use pagecast::publisher::GraphPublisher;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;

    println!("Scheduling content for page {}", config.page.page_id);
    println!("==============================");
    println!("  Input: {}", config.files.input.display());
    println!(
        "  Spacing: posts {}m, reels {}m, lead time {}m",
        config.spacing.post_spacing_min,
        config.spacing.reel_spacing_min,
        config.spacing.min_schedule_delay_min
    );

    let publisher = GraphPublisher::new(&config).context("Failed to create Graph API client")?;
    let pipeline = SchedulePipeline::new(&config, Arc::new(publisher));

    let summary = pipeline.run().await.map_err(|e| {
        tracing::error!(category = %e.category(), error = %e, "Scheduling run aborted");
        e
    })?;

    println!();
    println!(
        "Scheduled {} items ({} posts, {} reels), {} with error responses",
        summary.total, summary.posts, summary.reels, summary.errors
    );
    println!(
        "Scheduling complete. Check {} for full responses.",
        summary.output.display()
    );

    Ok(())
}
