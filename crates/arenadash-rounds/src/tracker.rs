//! # Round Phase Tracker
//!
//! Pure functions deriving round progress and per-phase status from a
//! validated [`Round`] snapshot. Nothing here holds state: calling any of
//! them twice with the same snapshot yields the same answer.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use arenadash_types::{Phase, PhaseStatus, Round};

use crate::schedule::PhaseSchedule;

/// Fraction of the round elapsed, `current_block / total_blocks`.
///
/// Not clamped. A value above `1.0` means the feed reported a block past
/// the end of the round.
pub fn compute_progress(round: &Round) -> f64 {
    round.current_block() as f64 / round.total_blocks() as f64
}

/// Status of `target` relative to the round's reported phase
pub fn classify_phase(round: &Round, target: Phase) -> PhaseStatus {
    match target.ordinal().cmp(&round.phase.ordinal()) {
        std::cmp::Ordering::Less => PhaseStatus::Completed,
        std::cmp::Ordering::Equal => PhaseStatus::Active,
        std::cmp::Ordering::Greater => PhaseStatus::Pending,
    }
}

/// Status of every phase, in round order
pub fn phase_statuses(round: &Round) -> [(Phase, PhaseStatus); 3] {
    Phase::ALL.map(|phase| (phase, classify_phase(round, phase)))
}

/// Fraction of the reported phase's window elapsed, clamped to `[0, 1]`.
///
/// `None` when `schedule` is not sized for this round.
pub fn phase_progress(round: &Round, schedule: &PhaseSchedule) -> Option<f64> {
    if schedule.total_blocks() != round.total_blocks() {
        return None;
    }
    Some(schedule.window(round.phase).elapsed_fraction(round.current_block()))
}

/// Agreement between the reported phase and the scheduled one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseConsistency {
    /// Reported phase matches the block counter
    Consistent,
    /// Block counter falls in another phase's window
    Mismatch { reported: Phase, derived: Phase },
    /// Block counter is past the end of the schedule
    OutOfRange { current_block: u64 },
    /// No phase schedule fits the round's block budget
    Unscheduled { total_blocks: u64 },
}

impl PhaseConsistency {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// Compare the reported phase against the schedule.
///
/// The reported phase stays authoritative; this only surfaces disagreement.
/// A schedule covering a different block budget yields `Unscheduled`.
pub fn check_consistency(round: &Round, schedule: &PhaseSchedule) -> PhaseConsistency {
    if schedule.total_blocks() != round.total_blocks() {
        return PhaseConsistency::Unscheduled {
            total_blocks: round.total_blocks(),
        };
    }

    match schedule.phase_at(round.current_block()) {
        Some(derived) if derived == round.phase => PhaseConsistency::Consistent,
        Some(derived) => PhaseConsistency::Mismatch {
            reported: round.phase,
            derived,
        },
        None => PhaseConsistency::OutOfRange {
            current_block: round.current_block(),
        },
    }
}

/// Round phase tracker bound to a phase schedule.
///
/// The configured schedule is resized to each round's block budget, so
/// rounds of any length get windows that partition their own blocks.
#[derive(Debug, Clone, Default)]
pub struct RoundPhaseTracker {
    schedule: PhaseSchedule,
}

impl RoundPhaseTracker {
    pub fn new(schedule: PhaseSchedule) -> Self {
        Self { schedule }
    }

    /// The configured schedule
    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Schedule sized for `round`, or `None` when the round is too short
    /// to give each phase a block
    pub fn schedule_for(&self, round: &Round) -> Option<Cow<'_, PhaseSchedule>> {
        if self.schedule.total_blocks() == round.total_blocks() {
            return Some(Cow::Borrowed(&self.schedule));
        }
        self.schedule.scaled_to(round.total_blocks()).ok().map(Cow::Owned)
    }

    pub fn compute_progress(&self, round: &Round) -> f64 {
        compute_progress(round)
    }

    pub fn classify_phase(&self, round: &Round, target: Phase) -> PhaseStatus {
        classify_phase(round, target)
    }

    pub fn phase_statuses(&self, round: &Round) -> [(Phase, PhaseStatus); 3] {
        phase_statuses(round)
    }

    pub fn phase_progress(&self, round: &Round) -> Option<f64> {
        self.schedule_for(round)
            .and_then(|schedule| phase_progress(round, &schedule))
    }

    pub fn check_consistency(&self, round: &Round) -> PhaseConsistency {
        match self.schedule_for(round) {
            Some(schedule) => check_consistency(round, &schedule),
            None => PhaseConsistency::Unscheduled {
                total_blocks: round.total_blocks(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
