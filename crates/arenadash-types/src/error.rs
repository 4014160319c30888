//! Round validation errors.

use thiserror::Error;

/// Errors raised while accepting a round snapshot.
///
/// Every variant is a contract violation by the data source. They are
/// reported at the ingestion boundary and never retried.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("invalid round config: total blocks must be positive, got {total_blocks}")]
    InvalidRoundConfig { total_blocks: i64 },

    #[error("invalid block counter: {current_block}")]
    InvalidBlock { current_block: i64 },

    #[error("{counter} {value} exceeds the largest block the feed can carry")]
    CounterOverflow { counter: &'static str, value: u64 },

    #[error("unrecognized phase: {0:?}")]
    UnrecognizedPhase(String),

    #[error("snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for round operations
pub type RoundResult<T> = Result<T, RoundError>;
