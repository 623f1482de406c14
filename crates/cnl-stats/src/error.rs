//! Error types for the statistics crate.

use thiserror::Error;

use cnl_core::CnlError;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur while aggregating games.
#[derive(Debug, Error)]
pub enum StatsError {
    /// No values or records were supplied.
    #[error("cannot summarize an empty set of games")]
    EmptyInput,

    /// Every record hit the turn cap, so there is nothing to summarize.
    #[error("no completed games ({anomalies} hit the turn cap)")]
    NoCompletedGames {
        /// Number of records flagged as anomalies.
        anomalies: usize,
    },

    /// Simulation core error.
    #[error("{0}")]
    Core(#[from] CnlError),
}

impl StatsError {
    /// Whether this error rejects the caller's input.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::EmptyInput | Self::NoCompletedGames { .. } => true,
            Self::Core(e) => e.is_invalid_argument(),
        }
    }
}
