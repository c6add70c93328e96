use anyhow::{Context, Result};

use pagecast::models::Cadence;
use pagecast::scheduler::DailyWindow;

pub fn window(count: usize, start: &str, end: &str, start_with: Cadence, format: &str) -> Result<()> {
    let window = DailyWindow::parse(start, end)
        .context("Invalid window")?
        .with_start_with(start_with);

    let slots = window.slots(count);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&slots)?),
        _ => {
            println!(
                "{count} slots from {start} to {end} ({} minutes)",
                window.span_minutes()
            );
            for slot in &slots {
                println!("{:>4}  {:<5}  {}", slot.index, slot.cadence, slot.time_label());
            }
        }
    }

    Ok(())
}
