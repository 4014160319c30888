//! # Phase Schedule
//!
//! Static block-range configuration of a round. Each [`Phase`] owns one
//! half-open window `[start, end)` and the three windows partition
//! `[0, total_blocks)` in round order:
//!
//! ```text
//! 0            1000           2000           3000
//! |  betting    |   trading    | liquidation  |
//! ```
//!
//! A schedule can only be obtained through [`PhaseSchedule::new`] (or the
//! helpers built on it), so every instance upholds the partition invariant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use arenadash_types::{Phase, DEFAULT_TOTAL_BLOCKS};

// ============================================================================
// Schedule Errors
// ============================================================================

/// Errors raised when phase windows do not partition a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("window {index} is {found}, expected {expected}")]
    WrongOrder {
        index: usize,
        expected: Phase,
        found: Phase,
    },

    #[error("{phase} window is empty ({start}..{end})")]
    EmptyWindow { phase: Phase, start: u64, end: u64 },

    #[error("first window starts at block {start}, expected 0")]
    DoesNotStartAtZero { start: u64 },

    #[error("gap between {before} and {after}: blocks {from}..{to} are unassigned")]
    Gap {
        before: Phase,
        after: Phase,
        from: u64,
        to: u64,
    },

    #[error("{before} and {after} overlap at blocks {from}..{to}")]
    Overlap {
        before: Phase,
        after: Phase,
        from: u64,
        to: u64,
    },

    #[error("phase lengths overflow the block counter")]
    Overflow,
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

// ============================================================================
// Phase Window
// ============================================================================

/// Block range assigned to one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub phase: Phase,
    /// Display name
    pub label: String,
    /// First block of the window (inclusive)
    pub start: u64,
    /// End of the window (exclusive)
    pub end: u64,
}

impl PhaseWindow {
    pub fn new(phase: Phase, start: u64, end: u64) -> Self {
        Self {
            phase,
            label: phase.label().to_string(),
            start,
            end,
        }
    }

    /// Number of blocks in the window
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, block: u64) -> bool {
        (self.start..self.end).contains(&block)
    }

    /// Fraction of the window elapsed at `block`, clamped to `[0, 1]`
    pub fn elapsed_fraction(&self, block: u64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let elapsed = block.saturating_sub(self.start).min(self.len());
        elapsed as f64 / self.len() as f64
    }
}

// ============================================================================
// Phase Schedule
// ============================================================================

/// Validated partition of a round into its three phase windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSchedule {
    windows: [PhaseWindow; 3],
}

impl PhaseSchedule {
    /// Build a schedule from explicit windows.
    ///
    /// The windows must be given in round order, be non-empty, start at
    /// block zero and be contiguous.
    pub fn new(windows: [PhaseWindow; 3]) -> ScheduleResult<Self> {
        for (index, (window, expected)) in windows.iter().zip(Phase::ALL).enumerate() {
            if window.phase != expected {
                return Err(ScheduleError::WrongOrder {
                    index,
                    expected,
                    found: window.phase,
                });
            }
            if window.is_empty() {
                return Err(ScheduleError::EmptyWindow {
                    phase: window.phase,
                    start: window.start,
                    end: window.end,
                });
            }
        }

        if windows[0].start != 0 {
            return Err(ScheduleError::DoesNotStartAtZero {
                start: windows[0].start,
            });
        }

        for pair in windows.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if after.start > before.end {
                return Err(ScheduleError::Gap {
                    before: before.phase,
                    after: after.phase,
                    from: before.end,
                    to: after.start,
                });
            }
            if after.start < before.end {
                return Err(ScheduleError::Overlap {
                    before: before.phase,
                    after: after.phase,
                    from: after.start,
                    to: before.end,
                });
            }
        }

        Ok(Self { windows })
    }

    /// Build a schedule from consecutive phase lengths
    pub fn from_lengths(betting: u64, trading: u64, liquidation: u64) -> ScheduleResult<Self> {
        let trading_start = betting;
        let liquidation_start = trading_start.checked_add(trading).ok_or(ScheduleError::Overflow)?;
        let end = liquidation_start.checked_add(liquidation).ok_or(ScheduleError::Overflow)?;

        Self::new([
            PhaseWindow::new(Phase::Betting, 0, trading_start),
            PhaseWindow::new(Phase::Trading, trading_start, liquidation_start),
            PhaseWindow::new(Phase::Liquidation, liquidation_start, end),
        ])
    }

    /// Split `total_blocks` into three equal windows.
    ///
    /// Any remainder goes to liquidation.
    pub fn even(total_blocks: u64) -> ScheduleResult<Self> {
        let third = total_blocks / 3;
        Self::from_lengths(third, third, total_blocks - 2 * third)
    }

    /// Resize the schedule to a round of `total_blocks`, keeping each
    /// phase's share of the round.
    ///
    /// Boundaries are rounded down. Fails with `EmptyWindow` when the
    /// round is too short to give every phase at least one block.
    pub fn scaled_to(&self, total_blocks: u64) -> ScheduleResult<Self> {
        if total_blocks == self.total_blocks() {
            return Ok(self.clone());
        }

        let current = u128::from(self.total_blocks());
        let target = u128::from(total_blocks);
        // Both boundaries stay below target, so they fit back into u64
        let scale = |boundary: u64| (u128::from(boundary) * target / current) as u64;

        let trading_start = scale(self.windows[1].start);
        let liquidation_start = scale(self.windows[2].start);

        Self::new([
            PhaseWindow::new(Phase::Betting, 0, trading_start),
            PhaseWindow::new(Phase::Trading, trading_start, liquidation_start),
            PhaseWindow::new(Phase::Liquidation, liquidation_start, total_blocks),
        ])
    }

    /// Total number of blocks covered by the schedule
    pub fn total_blocks(&self) -> u64 {
        self.windows[2].end
    }

    pub fn windows(&self) -> &[PhaseWindow; 3] {
        &self.windows
    }

    pub fn window(&self, phase: Phase) -> &PhaseWindow {
        &self.windows[phase.ordinal()]
    }

    /// Phase scheduled at `block`.
    ///
    /// The terminal block `total_blocks` still belongs to liquidation: a
    /// finished round reports its last phase. Blocks past the end have no
    /// phase.
    pub fn phase_at(&self, block: u64) -> Option<Phase> {
        if block == self.total_blocks() {
            return Some(Phase::Liquidation);
        }
        self.windows.iter().find(|w| w.contains(block)).map(|w| w.phase)
    }
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        let third = DEFAULT_TOTAL_BLOCKS / 3;
        Self {
            windows: [
                PhaseWindow::new(Phase::Betting, 0, third),
                PhaseWindow::new(Phase::Trading, third, 2 * third),
                PhaseWindow::new(Phase::Liquidation, 2 * third, DEFAULT_TOTAL_BLOCKS),
            ],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = PhaseSchedule::default();

        assert_eq!(schedule.total_blocks(), 3000);
        assert_eq!(schedule.window(Phase::Betting).start, 0);
        assert_eq!(schedule.window(Phase::Betting).end, 1000);
        assert_eq!(schedule.window(Phase::Trading).end, 2000);
        assert_eq!(schedule.window(Phase::Liquidation).end, 3000);
        assert_eq!(schedule, PhaseSchedule::even(3000).unwrap());
    }

    #[test]
    fn test_even_remainder_goes_to_liquidation() {
        let schedule = PhaseSchedule::even(100).unwrap();

        assert_eq!(schedule.window(Phase::Betting).len(), 33);
        assert_eq!(schedule.window(Phase::Trading).len(), 33);
        assert_eq!(schedule.window(Phase::Liquidation).len(), 34);
        assert_eq!(schedule.total_blocks(), 100);
    }

    #[test]
    fn test_even_too_small() {
        let result = PhaseSchedule::even(2);
        assert!(matches!(result, Err(ScheduleError::EmptyWindow { phase: Phase::Betting, .. })));
    }

    #[test]
    fn test_phase_at_boundaries() {
        let schedule = PhaseSchedule::default();

        assert_eq!(schedule.phase_at(0), Some(Phase::Betting));
        assert_eq!(schedule.phase_at(999), Some(Phase::Betting));
        assert_eq!(schedule.phase_at(1000), Some(Phase::Trading));
        assert_eq!(schedule.phase_at(1999), Some(Phase::Trading));
        assert_eq!(schedule.phase_at(2000), Some(Phase::Liquidation));
        assert_eq!(schedule.phase_at(3000), Some(Phase::Liquidation));
        assert_eq!(schedule.phase_at(3001), None);
    }

    #[test]
    fn test_wrong_order() {
        let result = PhaseSchedule::new([
            PhaseWindow::new(Phase::Trading, 0, 10),
            PhaseWindow::new(Phase::Betting, 10, 20),
            PhaseWindow::new(Phase::Liquidation, 20, 30),
        ]);

        assert_eq!(
            result.unwrap_err(),
            ScheduleError::WrongOrder {
                index: 0,
                expected: Phase::Betting,
                found: Phase::Trading,
            }
        );
    }

    #[test]
    fn test_gap_rejected() {
        let result = PhaseSchedule::new([
            PhaseWindow::new(Phase::Betting, 0, 10),
            PhaseWindow::new(Phase::Trading, 12, 20),
            PhaseWindow::new(Phase::Liquidation, 20, 30),
        ]);

        assert!(matches!(result, Err(ScheduleError::Gap { from: 10, to: 12, .. })));
    }

    #[test]
    fn test_overlap_rejected() {
        let result = PhaseSchedule::new([
            PhaseWindow::new(Phase::Betting, 0, 10),
            PhaseWindow::new(Phase::Trading, 10, 25),
            PhaseWindow::new(Phase::Liquidation, 20, 30),
        ]);

        assert!(matches!(result, Err(ScheduleError::Overlap { from: 20, to: 25, .. })));
    }

    #[test]
    fn test_must_start_at_zero() {
        let result = PhaseSchedule::new([
            PhaseWindow::new(Phase::Betting, 5, 10),
            PhaseWindow::new(Phase::Trading, 10, 20),
            PhaseWindow::new(Phase::Liquidation, 20, 30),
        ]);

        assert_eq!(result.unwrap_err(), ScheduleError::DoesNotStartAtZero { start: 5 });
    }

    #[test]
    fn test_overflow_rejected() {
        let result = PhaseSchedule::from_lengths(u64::MAX, 1, 1);
        assert_eq!(result.unwrap_err(), ScheduleError::Overflow);
    }

    #[test]
    fn test_scaled_keeps_shares() {
        let schedule = PhaseSchedule::from_lengths(200, 2600, 200).unwrap();

        let doubled = schedule.scaled_to(6000).unwrap();
        assert_eq!(doubled.window(Phase::Betting).end, 400);
        assert_eq!(doubled.window(Phase::Trading).end, 5600);
        assert_eq!(doubled.total_blocks(), 6000);

        let small = PhaseSchedule::default().scaled_to(300).unwrap();
        assert_eq!(small.window(Phase::Trading).start, 100);
        assert_eq!(small.window(Phase::Liquidation).start, 200);
        assert_eq!(small.phase_at(250), Some(Phase::Liquidation));

        assert_eq!(schedule.scaled_to(3000).unwrap(), schedule);
    }

    #[test]
    fn test_scaled_uneven_budget() {
        let scaled = PhaseSchedule::default().scaled_to(100).unwrap();

        assert_eq!(scaled.window(Phase::Betting).len(), 33);
        assert_eq!(scaled.window(Phase::Trading).len(), 33);
        assert_eq!(scaled.window(Phase::Liquidation).len(), 34);
    }

    #[test]
    fn test_scaled_too_short() {
        let result = PhaseSchedule::default().scaled_to(2);
        assert!(matches!(result, Err(ScheduleError::EmptyWindow { .. })));
    }

    #[test]
    fn test_elapsed_fraction() {
        let window = PhaseWindow::new(Phase::Trading, 1000, 2000);

        assert_eq!(window.elapsed_fraction(500), 0.0);
        assert_eq!(window.elapsed_fraction(1000), 0.0);
        assert_eq!(window.elapsed_fraction(1250), 0.25);
        assert_eq!(window.elapsed_fraction(2000), 1.0);
        assert_eq!(window.elapsed_fraction(9000), 1.0);
    }
}
