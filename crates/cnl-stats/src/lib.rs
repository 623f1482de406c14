//! Statistics over batches of simulated Chutes and Ladders games.
//!
//! Every aggregation works on completed games only. Records that hit the
//! turn cap are counted separately and never feed a mean or a total.

/// Batch-level statistics.
pub mod aggregate;
/// Error types for the statistics crate.
pub mod error;
/// Turn count histograms.
pub mod histogram;
/// Link usage and conditional game length.
pub mod links;
/// Repeated batches and the spread of their statistics.
pub mod sets;
/// Mean, median, mode and spread.
pub mod summary;

pub use aggregate::AggregateStats;
pub use error::{StatsError, StatsResult};
pub use histogram::{DEFAULT_HISTOGRAM_MAX, TurnHistogram, turn_histogram};
pub use links::{
    ConditionalTurns, LinkFrequency, average_traversals_per_game, conditional_mean_turns,
    link_frequencies, total_traversals,
};
pub use sets::{SetStudy, StatSeries};
pub use summary::{BoxSummary, TurnSummary, mean, median, mode, population_std_dev};
