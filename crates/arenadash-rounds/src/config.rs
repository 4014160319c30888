//! Schedule configuration.
//!
//! Phase lengths are configured in blocks and turned into a validated
//! [`PhaseSchedule`] at startup.

use serde::{Deserialize, Serialize};

use crate::schedule::{PhaseSchedule, ScheduleResult};

/// Phase lengths, in blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_phase_blocks")]
    pub betting_blocks: u64,

    #[serde(default = "default_phase_blocks")]
    pub trading_blocks: u64,

    #[serde(default = "default_phase_blocks")]
    pub liquidation_blocks: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            betting_blocks: default_phase_blocks(),
            trading_blocks: default_phase_blocks(),
            liquidation_blocks: default_phase_blocks(),
        }
    }
}

impl ScheduleConfig {
    /// Total round length implied by the configured phases
    pub fn total_blocks(&self) -> u64 {
        self.betting_blocks
            .saturating_add(self.trading_blocks)
            .saturating_add(self.liquidation_blocks)
    }

    pub fn build(&self) -> ScheduleResult<PhaseSchedule> {
        PhaseSchedule::from_lengths(self.betting_blocks, self.trading_blocks, self.liquidation_blocks)
    }
}

fn default_phase_blocks() -> u64 {
    1000
}
