use anyhow::{Context, Result};
use std::path::Path;

use pagecast::config::Config;
use pagecast::pipeline::plan_sheet;
use pagecast::scheduler::SystemClock;

pub fn plan(config_path: Option<&Path>, format: &str) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;

    let plan = plan_sheet(&config.files, config.spacing, &SystemClock)
        .with_context(|| format!("Failed to plan {}", config.files.input.display()))?;

    match format {
        "json" => {
            let entries: Vec<_> = plan
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "position": entry.position,
                        "cadence": entry.cadence,
                        "type": entry.item.content_type,
                        "scheduled_time": entry.scheduled_time(),
                        "description": entry.item.description,
                        "direct_download_link": entry.item.direct_download_link,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            if plan.is_empty() {
                println!("Nothing to schedule in {}", config.files.input.display());
                return Ok(());
            }

            println!("{:>4}  {:<5}  {:<19}  DESCRIPTION", "#", "TRACK", "SCHEDULED");
            for entry in &plan {
                println!(
                    "{:>4}  {:<5}  {:<19}  {}",
                    entry.position + 1,
                    entry.cadence,
                    entry.scheduled_time(),
                    truncate_text(&entry.item.description, 60)
                );
            }
        }
    }

    Ok(())
}

/// Truncate text to a maximum number of characters
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
