use std::path::Path;

use anyhow::{Context, Result};

use options_amm::events::EventBatch;

/// Entry point for the `reconstruct` command: rebuild every trade of a stored batch.
pub fn run(events_path: &Path) -> Result<()> {
    let batch = EventBatch::load(events_path)
        .with_context(|| format!("loading event batch {}", events_path.display()))?;
    let trades = batch.reconstruct()?;
    println!("{}", serde_json::to_string_pretty(&trades)?);
    Ok(())
}
