//! ArenaDash Types - Round and Phase Domain Types
//!
//! This crate defines the core types shared by the arena round tracker:
//! - Round identifiers and validated round snapshots
//! - The three competitive phases and their ordering
//! - Per-phase status labels for the presentation layer
//!
//! # Ingestion
//!
//! The real-time feed delivers [`RoundSnapshot`] values. They are untrusted
//! and must be converted into a [`Round`] before anything is computed:
//!
//! ```
//! use arenadash_types::{Phase, Round, RoundSnapshot};
//!
//! let snapshot: RoundSnapshot = serde_json::from_str(
//!     r#"{"id":"r-7","currentBlock":1500,"totalBlocks":3000,"phase":"trading"}"#,
//! ).unwrap();
//!
//! let round = Round::try_from(snapshot).unwrap();
//! assert_eq!(round.phase, Phase::Trading);
//! ```

pub mod error;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use error::{RoundError, RoundResult};

/// Default block budget of a round
pub const DEFAULT_TOTAL_BLOCKS: u64 = 3000;

// ============================================================================
// ID Types
// ============================================================================

/// Round identifier, opaque to the tracker
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub String);

impl RoundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Phases
// ============================================================================

/// Competitive phase of a round.
///
/// Phases are strictly sequential; the derived ordering follows the
/// declaration order `Betting < Trading < Liquidation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Agents place their bets
    Betting,
    /// Agents trade against the market
    Trading,
    /// Open positions are closed out
    Liquidation,
}

impl Phase {
    /// All phases in round order
    pub const ALL: [Phase; 3] = [Phase::Betting, Phase::Trading, Phase::Liquidation];

    /// Position of the phase within [`Phase::ALL`]
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Betting => 0,
            Self::Trading => 1,
            Self::Liquidation => 2,
        }
    }

    /// Get display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Betting => "Betting",
            Self::Trading => "Trading",
            Self::Liquidation => "Liquidation",
        }
    }

    /// Wire name, as used by the feed
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Betting => "betting",
            Self::Trading => "trading",
            Self::Liquidation => "liquidation",
        }
    }

    /// The phase that follows this one, if any
    pub fn next(&self) -> Option<Phase> {
        Self::ALL.get(self.ordinal() + 1).copied()
    }

    /// The phase that precedes this one, if any
    pub fn previous(&self) -> Option<Phase> {
        self.ordinal().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_first(&self) -> bool {
        self.previous().is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RoundError::UnrecognizedPhase(s.to_string()))
    }
}

/// Status of a phase relative to the round's current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    /// Phase already finished
    Completed,
    /// Phase in progress
    Active,
    /// Phase not reached yet
    Pending,
}

impl PhaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Active => "active",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Rounds
// ============================================================================

/// Raw round snapshot as delivered by the real-time feed.
///
/// Nothing here is trusted: counters are signed and the phase is a free-form
/// string so that every contract violation maps to a precise [`RoundError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    #[serde(default)]
    pub id: RoundId,
    pub current_block: i64,
    pub total_blocks: i64,
    pub phase: String,
}

/// A validated round.
///
/// `total_blocks` is always positive. `current_block` may run past
/// `total_blocks` when the feed is stale; see [`Round::is_within_bounds`].
/// Both counters fit the signed wire format, up to [`Round::MAX_BLOCK`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoundSnapshot", into = "RoundSnapshot")]
pub struct Round {
    pub id: RoundId,
    current_block: u64,
    total_blocks: u64,
    pub phase: Phase,
}

impl Round {
    /// Largest counter a [`RoundSnapshot`] can represent
    pub const MAX_BLOCK: u64 = i64::MAX as u64;

    /// Create a round, rejecting an empty block budget and counters the
    /// snapshot format cannot carry
    pub fn new(id: RoundId, current_block: u64, total_blocks: u64, phase: Phase) -> RoundResult<Self> {
        if total_blocks == 0 {
            return Err(RoundError::InvalidRoundConfig { total_blocks: 0 });
        }
        if total_blocks > Self::MAX_BLOCK {
            return Err(RoundError::CounterOverflow {
                counter: "total_blocks",
                value: total_blocks,
            });
        }
        if current_block > Self::MAX_BLOCK {
            return Err(RoundError::CounterOverflow {
                counter: "current_block",
                value: current_block,
            });
        }

        Ok(Self {
            id,
            current_block,
            total_blocks,
            phase,
        })
    }

    pub fn current_block(&self) -> u64 {
        self.current_block
    }

    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }

    /// Whether `current_block` lies in `[0, total_blocks]`
    pub fn is_within_bounds(&self) -> bool {
        self.current_block <= self.total_blocks
    }

    /// Whether the block counter reached the end of the round
    pub fn is_finished(&self) -> bool {
        self.current_block >= self.total_blocks
    }

    /// Blocks left before the round ends, saturating at zero
    pub fn remaining_blocks(&self) -> u64 {
        self.total_blocks.saturating_sub(self.current_block)
    }
}

impl TryFrom<RoundSnapshot> for Round {
    type Error = RoundError;

    fn try_from(snapshot: RoundSnapshot) -> Result<Self, Self::Error> {
        if snapshot.total_blocks <= 0 {
            return Err(RoundError::InvalidRoundConfig {
                total_blocks: snapshot.total_blocks,
            });
        }
        let current_block = u64::try_from(snapshot.current_block).map_err(|_| RoundError::InvalidBlock {
            current_block: snapshot.current_block,
        })?;
        let phase: Phase = snapshot.phase.parse()?;

        Round::new(snapshot.id, current_block, snapshot.total_blocks as u64, phase)
    }
}

impl From<Round> for RoundSnapshot {
    fn from(round: Round) -> Self {
        Self {
            id: round.id,
            // Round::new keeps both counters within MAX_BLOCK
            current_block: round.current_block as i64,
            total_blocks: round.total_blocks as i64,
            phase: round.phase.as_str().to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current: i64, total: i64, phase: &str) -> RoundSnapshot {
        RoundSnapshot {
            id: RoundId::new("round-1"),
            current_block: current,
            total_blocks: total,
            phase: phase.to_string(),
        }
    }

    #[test]
    fn test_phase_order() {
        assert!(Phase::Betting < Phase::Trading);
        assert!(Phase::Trading < Phase::Liquidation);
        assert_eq!(Phase::ALL.map(|p| p.ordinal()), [0, 1, 2]);
    }

    #[test]
    fn test_phase_neighbours() {
        assert_eq!(Phase::Betting.next(), Some(Phase::Trading));
        assert_eq!(Phase::Liquidation.next(), None);
        assert_eq!(Phase::Betting.previous(), None);
        assert_eq!(Phase::Liquidation.previous(), Some(Phase::Trading));
        assert!(Phase::Betting.is_first());
        assert!(Phase::Liquidation.is_last());
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!("betting".parse::<Phase>().unwrap(), Phase::Betting);
        assert_eq!(" Trading ".parse::<Phase>().unwrap(), Phase::Trading);
        assert_eq!("LIQUIDATION".parse::<Phase>().unwrap(), Phase::Liquidation);

        let err = "settlement".parse::<Phase>().unwrap_err();
        assert!(matches!(err, RoundError::UnrecognizedPhase(ref p) if p == "settlement"));
    }

    #[test]
    fn test_phase_serde_names() {
        assert_eq!(serde_json::to_string(&Phase::Trading).unwrap(), "\"trading\"");
        assert_eq!(serde_json::to_string(&PhaseStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_round_from_snapshot() {
        let round = Round::try_from(snapshot(1500, 3000, "trading")).unwrap();

        assert_eq!(round.id.as_str(), "round-1");
        assert_eq!(round.current_block(), 1500);
        assert_eq!(round.total_blocks(), 3000);
        assert_eq!(round.phase, Phase::Trading);
        assert_eq!(round.remaining_blocks(), 1500);
        assert!(round.is_within_bounds());
        assert!(!round.is_finished());
    }

    #[test]
    fn test_zero_total_blocks_rejected() {
        let result = Round::try_from(snapshot(0, 0, "betting"));
        assert!(matches!(result, Err(RoundError::InvalidRoundConfig { total_blocks: 0 })));

        let result = Round::try_from(snapshot(0, -5, "betting"));
        assert!(matches!(result, Err(RoundError::InvalidRoundConfig { total_blocks: -5 })));

        let result = Round::new(RoundId::default(), 0, 0, Phase::Betting);
        assert!(matches!(result, Err(RoundError::InvalidRoundConfig { .. })));
    }

    #[test]
    fn test_negative_block_rejected() {
        let result = Round::try_from(snapshot(-1, 3000, "betting"));
        assert!(matches!(result, Err(RoundError::InvalidBlock { current_block: -1 })));
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let result = Round::try_from(snapshot(10, 3000, "halftime"));
        assert!(matches!(result, Err(RoundError::UnrecognizedPhase(_))));
    }

    #[test]
    fn test_overrun_is_kept() {
        let round = Round::try_from(snapshot(3200, 3000, "liquidation")).unwrap();
        assert!(!round.is_within_bounds());
        assert!(round.is_finished());
        assert_eq!(round.remaining_blocks(), 0);
    }

    #[test]
    fn test_round_json() {
        let json = r#"{"id":"abc","currentBlock":0,"totalBlocks":3000,"phase":"betting"}"#;
        let round: Round = serde_json::from_str(json).unwrap();
        assert_eq!(round.phase, Phase::Betting);
        assert_eq!(serde_json::to_string(&round).unwrap(), json);

        let bad = r#"{"currentBlock":0,"totalBlocks":0,"phase":"betting"}"#;
        assert!(serde_json::from_str::<Round>(bad).is_err());
    }

    #[test]
    fn test_counters_beyond_wire_range_rejected() {
        let result = Round::new(RoundId::default(), u64::MAX, 3000, Phase::Liquidation);
        assert!(matches!(
            result,
            Err(RoundError::CounterOverflow { counter: "current_block", value: u64::MAX })
        ));

        let result = Round::new(RoundId::default(), 0, Round::MAX_BLOCK + 1, Phase::Betting);
        assert!(matches!(result, Err(RoundError::CounterOverflow { counter: "total_blocks", .. })));
    }

    #[test]
    fn test_largest_counters_serialize_exactly() {
        let round = Round::new(RoundId::new("edge"), Round::MAX_BLOCK, Round::MAX_BLOCK, Phase::Liquidation).unwrap();

        let snapshot = RoundSnapshot::from(round.clone());
        assert_eq!(snapshot.current_block, i64::MAX);
        assert_eq!(snapshot.total_blocks, i64::MAX);
        assert_eq!(Round::try_from(snapshot).unwrap(), round);
    }

    #[test]
    fn test_snapshot_id_defaults() {
        let json = r#"{"currentBlock":5,"totalBlocks":10,"phase":"trading"}"#;
        let snapshot: RoundSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.id, RoundId::default());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_snapshots_always_convert(current in 0i64..1_000_000, total in 1i64..1_000_000, idx in 0usize..3) {
                let phase = Phase::ALL[idx];
                let round = Round::try_from(snapshot(current, total, phase.as_str())).unwrap();
                prop_assert_eq!(round.current_block(), current as u64);
                prop_assert_eq!(round.total_blocks(), total as u64);
                prop_assert_eq!(round.phase, phase);
            }

            #[test]
            fn non_positive_totals_always_rejected(current in 0i64..1000, total in i64::MIN..=0) {
                let is_invalid_config = matches!(
                    Round::try_from(snapshot(current, total, "betting")),
                    Err(RoundError::InvalidRoundConfig { .. })
                );
                prop_assert!(is_invalid_config);
            }
        }
    }
}
