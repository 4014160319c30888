//! Presentation snapshot of a round.

use serde::{Deserialize, Serialize};

use arenadash_types::{Phase, PhaseStatus, Round, RoundId};

use crate::tracker::{PhaseConsistency, RoundPhaseTracker};

/// Block range `[start, end)` of a phase window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpan {
    pub start: u64,
    pub end: u64,
}

/// One row of the phase indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub phase: Phase,
    pub label: String,
    pub status: PhaseStatus,
    /// Window sized for this round, `None` when the round is too short
    /// to schedule
    pub span: Option<BlockSpan>,
}

/// Everything the dashboard needs to draw a round's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub round_id: RoundId,
    pub phase: Phase,
    pub current_block: u64,
    pub total_blocks: u64,
    /// Raw `current_block / total_blocks`
    pub progress: f64,
    /// Progress as a percentage for display, clamped to 0..=100
    pub percent: f64,
    /// Elapsed fraction of the active phase's window
    pub phase_progress: Option<f64>,
    pub phases: Vec<PhaseEntry>,
    pub consistency: PhaseConsistency,
}

impl RoundView {
    pub fn build(round: &Round, tracker: &RoundPhaseTracker) -> Self {
        let progress = tracker.compute_progress(round);
        let schedule = tracker.schedule_for(round);

        let phases = tracker
            .phase_statuses(round)
            .into_iter()
            .map(|(phase, status)| {
                let window = schedule.as_ref().map(|s| s.window(phase));
                PhaseEntry {
                    phase,
                    label: window.map_or_else(|| phase.label().to_string(), |w| w.label.clone()),
                    status,
                    span: window.map(|w| BlockSpan {
                        start: w.start,
                        end: w.end,
                    }),
                }
            })
            .collect();

        Self {
            round_id: round.id.clone(),
            phase: round.phase,
            current_block: round.current_block(),
            total_blocks: round.total_blocks(),
            progress,
            percent: (progress * 100.0).clamp(0.0, 100.0),
            phase_progress: tracker.phase_progress(round),
            phases,
            consistency: tracker.check_consistency(round),
        }
    }

    pub fn status_of(&self, phase: Phase) -> Option<PhaseStatus> {
        self.phases.iter().find(|e| e.phase == phase).map(|e| e.status)
    }

    /// Text progress bar of `width` cells
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = ((self.percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
    }
}
