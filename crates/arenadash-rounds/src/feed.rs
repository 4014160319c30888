//! # Round Feed
//!
//! Latest-snapshot store between the real-time feed and the dashboard.
//!
//! Snapshots are validated, turned into a [`RoundView`] and published on a
//! `tokio::sync::watch` channel. Only the newest view is kept: a subscriber
//! that falls behind sees the most recent round state, never a backlog.
//! Publishing does not need a runtime, so the feed can be driven from plain
//! synchronous code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use arenadash_types::{Round, RoundError, RoundId, RoundResult, RoundSnapshot};

use crate::tracker::{PhaseConsistency, RoundPhaseTracker};
use crate::view::RoundView;

/// A published view with its arrival metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Position in the stream of accepted snapshots, starting at 1
    pub sequence: u64,
    pub received_at: DateTime<Utc>,
    pub view: RoundView,
}

/// How an accepted snapshot relates to the previous one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedUpdate {
    /// First snapshot, or a snapshot for a different round
    Started { round_id: RoundId },
    /// Same round, block counter moved forward or stayed put
    Advanced { from: u64, to: u64 },
    /// Same round, block counter went backwards
    Regressed { from: u64, to: u64 },
}

impl FeedUpdate {
    fn classify(previous: Option<&FeedEntry>, view: &RoundView) -> Self {
        match previous {
            Some(prev) if prev.view.round_id == view.round_id => {
                let (from, to) = (prev.view.current_block, view.current_block);
                if to < from {
                    Self::Regressed { from, to }
                } else {
                    Self::Advanced { from, to }
                }
            }
            _ => Self::Started {
                round_id: view.round_id.clone(),
            },
        }
    }
}

/// Holds the most recently received round view
pub struct RoundFeed {
    tracker: RoundPhaseTracker,
    sender: watch::Sender<Option<FeedEntry>>,
}

impl RoundFeed {
    pub fn new(tracker: RoundPhaseTracker) -> Self {
        let (sender, _) = watch::channel(None);
        Self { tracker, sender }
    }

    pub fn tracker(&self) -> &RoundPhaseTracker {
        &self.tracker
    }

    /// Accept a snapshot from the feed.
    ///
    /// Invalid snapshots are rejected and leave the published view untouched.
    /// Valid ones always replace it, even when the block counter regressed.
    pub fn ingest(&self, snapshot: RoundSnapshot) -> RoundResult<FeedUpdate> {
        let round = Round::try_from(snapshot).map_err(|e| {
            warn!(error = %e, "Rejected round snapshot");
            e
        })?;

        self.inspect(&round);
        let view = RoundView::build(&round, &self.tracker);

        let (update, sequence) = {
            let previous = self.sender.borrow();
            (
                FeedUpdate::classify(previous.as_ref(), &view),
                previous.as_ref().map_or(1, |prev| prev.sequence + 1),
            )
        };

        self.sender.send_replace(Some(FeedEntry {
            sequence,
            received_at: Utc::now(),
            view,
        }));

        match &update {
            FeedUpdate::Started { round_id } => {
                info!(round = %round_id, block = round.current_block(), phase = %round.phase, "New round");
            }
            FeedUpdate::Advanced { from, to } => {
                debug!(round = %round.id, from, to, phase = %round.phase, "Round advanced");
            }
            FeedUpdate::Regressed { from, to } => {
                warn!(round = %round.id, from, to, "Block counter went backwards");
            }
        }

        Ok(update)
    }

    /// Decode a JSON snapshot and ingest it
    pub fn ingest_json(&self, json: &str) -> RoundResult<FeedUpdate> {
        let snapshot: RoundSnapshot = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Undecodable round snapshot");
            RoundError::from(e)
        })?;
        self.ingest(snapshot)
    }

    /// Most recent view, if any snapshot was accepted
    pub fn latest(&self) -> Option<RoundView> {
        self.sender.borrow().as_ref().map(|entry| entry.view.clone())
    }

    /// Most recent entry with its arrival metadata
    pub fn latest_entry(&self) -> Option<FeedEntry> {
        self.sender.borrow().clone()
    }

    /// Subscribe to view updates
    pub fn subscribe(&self) -> watch::Receiver<Option<FeedEntry>> {
        self.sender.subscribe()
    }

    fn inspect(&self, round: &Round) {
        let configured = self.tracker.schedule().total_blocks();
        if round.total_blocks() != configured {
            debug!(
                round = %round.id,
                round_blocks = round.total_blocks(),
                schedule_blocks = configured,
                "Scaling phase schedule to round budget"
            );
        }

        match self.tracker.check_consistency(round) {
            PhaseConsistency::Consistent => {}
            PhaseConsistency::Mismatch { reported, derived } => {
                warn!(
                    round = %round.id,
                    block = round.current_block(),
                    %reported,
                    %derived,
                    "Reported phase disagrees with schedule"
                );
            }
            PhaseConsistency::OutOfRange { current_block } => {
                warn!(
                    round = %round.id,
                    current_block,
                    total_blocks = round.total_blocks(),
                    "Block counter past end of round"
                );
            }
            PhaseConsistency::Unscheduled { total_blocks } => {
                warn!(
                    round = %round.id,
                    total_blocks,
                    "Round too short to schedule every phase"
                );
            }
        }
    }
}

impl Default for RoundFeed {
    fn default() -> Self {
        Self::new(RoundPhaseTracker::default())
    }
}
