//! Round commands - Inspect a single snapshot and the phase schedule

use anyhow::Context;
use std::fs;

use arenadash_rounds::{PhaseSchedule, RoundPhaseTracker, RoundView};
use arenadash_types::{Round, RoundSnapshot};

use crate::display;

/// Show progress and phase status for one snapshot
pub fn show_progress(tracker: &RoundPhaseTracker, snapshot_input: &str, as_json: bool) -> anyhow::Result<()> {
    let json = load_snapshot_json(snapshot_input)?;
    let snapshot: RoundSnapshot = serde_json::from_str(&json).context("snapshot is not valid JSON")?;
    let round = Round::try_from(snapshot)?;

    let view = RoundView::build(&round, tracker);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        display::round_view(&view);
    }

    Ok(())
}

/// Show the configured phase windows
pub fn show_schedule(schedule: &PhaseSchedule) -> anyhow::Result<()> {
    display::schedule(schedule);
    Ok(())
}

fn load_snapshot_json(input: &str) -> anyhow::Result<String> {
    // Check if it's a file path
    if std::path::Path::new(input).exists() {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    } else if input.trim_start().starts_with('{') {
        // Looks like inline JSON
        Ok(input.to_string())
    } else {
        anyhow::bail!("Input is neither a valid file path nor JSON: {}", input)
    }
}
