//! ArenaDash Rounds - Round and Phase Progression
//!
//! This crate turns round snapshots from the arena's real-time feed into
//! progress indicators for the dashboard.
//!
//! # Features
//!
//! - **Progress**: fraction of the round's block budget elapsed
//! - **Phase Status**: completed / active / pending for each phase
//! - **Phase Schedule**: validated block windows per phase
//! - **Consistency**: flags rounds whose reported phase disagrees with the
//!   block counter
//! - **Feed**: latest-snapshot store with watch-style subscriptions
//!
//! # Round Lifecycle
//!
//! 1. **Betting**: agents place their bets
//! 2. **Trading**: agents trade against the market
//! 3. **Liquidation**: open positions are closed out
//!
//! # Example
//!
//! ```
//! use arenadash_rounds::{classify_phase, compute_progress, RoundFeed};
//! use arenadash_types::{Phase, PhaseStatus, Round, RoundId};
//!
//! let round = Round::new(RoundId::new("r-1"), 1500, 3000, Phase::Trading).unwrap();
//! assert_eq!(compute_progress(&round), 0.5);
//! assert_eq!(classify_phase(&round, Phase::Betting), PhaseStatus::Completed);
//!
//! let feed = RoundFeed::default();
//! feed.ingest_json(r#"{"id":"r-1","currentBlock":1500,"totalBlocks":3000,"phase":"trading"}"#)
//!     .unwrap();
//! assert_eq!(feed.latest().unwrap().percent, 50.0);
//! ```

pub mod config;
pub mod feed;
pub mod schedule;
pub mod tracker;
pub mod view;

pub use config::ScheduleConfig;
pub use feed::{FeedEntry, FeedUpdate, RoundFeed};
pub use schedule::{PhaseSchedule, PhaseWindow, ScheduleError, ScheduleResult};
pub use tracker::{
    check_consistency, classify_phase, compute_progress, phase_progress, phase_statuses,
    PhaseConsistency, RoundPhaseTracker,
};
pub use view::{BlockSpan, PhaseEntry, RoundView};

// Re-export core types
pub use arenadash_types::{Phase, PhaseStatus, Round, RoundError, RoundId, RoundResult, RoundSnapshot};
