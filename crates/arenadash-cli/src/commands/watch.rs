//! Watch command - Follow a stream of newline-delimited snapshots

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use arenadash_rounds::{RoundFeed, RoundPhaseTracker};

use crate::display;

/// Summary of a watch session
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WatchSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Feed snapshots from `input` (stdin when `None`) through a round feed
pub fn run_watch(tracker: RoundPhaseTracker, input: Option<&str>) -> anyhow::Result<WatchSummary> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let feed = RoundFeed::new(tracker);
    let summary = follow(&feed, reader)?;

    println!();
    display::kv("Accepted", &summary.accepted.to_string());
    display::kv("Rejected", &summary.rejected.to_string());

    Ok(summary)
}

fn follow(feed: &RoundFeed, reader: impl BufRead) -> anyhow::Result<WatchSummary> {
    let mut summary = WatchSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read snapshot stream")?;
        if line.trim().is_empty() {
            continue;
        }

        match feed.ingest_json(&line) {
            Ok(update) => {
                summary.accepted += 1;
                if let Some(view) = feed.latest() {
                    display::feed_line(&update, &view);
                }
            }
            Err(e) => {
                summary.rejected += 1;
                display::error(&format!("line {}: {}", index + 1, e));
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_follow_counts_lines() {
        let input = concat!(
            r#"{"id":"r-1","currentBlock":0,"totalBlocks":3000,"phase":"betting"}"#, "\n",
            "\n",
            r#"{"id":"r-1","currentBlock":1500,"totalBlocks":3000,"phase":"trading"}"#, "\n",
            r#"{"id":"r-1","currentBlock":1600,"totalBlocks":3000,"phase":"intermission"}"#, "\n",
            "not json\n",
        );

        let feed = RoundFeed::default();
        let summary = follow(&feed, Cursor::new(input)).unwrap();

        assert_eq!(summary, WatchSummary { accepted: 2, rejected: 2 });
        assert_eq!(feed.latest().unwrap().current_block, 1500);
    }
}
