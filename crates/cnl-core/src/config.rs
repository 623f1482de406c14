use std::time::Duration;

use rand::Rng;

use crate::board::ChuteVariant;
use crate::error::{CnlError, CnlResult};
use crate::trajectory::DEFAULT_TURN_CAP;

/// Configuration for a batch of simulated games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// RNG seed for a reproducible batch. `None` draws a fresh seed.
    pub seed: Option<u64>,
    /// A game still running after `turn_cap + 1` turns is flagged as an anomaly.
    pub turn_cap: u32,
    /// Board edition used when the runner builds the standard board.
    pub variant: ChuteVariant,
    /// Run games on the rayon thread pool.
    pub parallel: bool,
    /// Wall-clock budget for the whole batch.
    pub timeout: Option<Duration>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            turn_cap: DEFAULT_TURN_CAP,
            variant: ChuteVariant::default(),
            parallel: false,
            timeout: None,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for a reproducible batch.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the per-game turn cap.
    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }

    /// Set the board edition.
    pub fn with_variant(mut self, variant: ChuteVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Enable or disable parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stop the batch once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured seed, or a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> CnlResult<()> {
        if self.turn_cap == 0 {
            return Err(CnlError::InvalidConfig(
                "turn cap must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
