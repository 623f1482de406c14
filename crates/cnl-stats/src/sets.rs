//! Spread of batch statistics across repeated batches.
//!
//! Each set is an independent batch drawn from `base_seed + i`. The four
//! summary statistics of every set are collected and then reduced to
//! five-number summaries, showing how much a single batch of a given size
//! can be trusted.

use serde::Serialize;

use cnl_core::{BatchRunner, CnlError};

use crate::error::{StatsError, StatsResult};
use crate::summary::{BoxSummary, TurnSummary};

/// One statistic observed once per set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSeries {
    /// Value of the statistic in each set, in set order.
    pub values: Vec<f64>,
    /// Five-number summary of `values`.
    pub summary: BoxSummary,
}

impl StatSeries {
    fn new(values: Vec<f64>) -> StatsResult<Self> {
        let summary = BoxSummary::from_values(&values)?;
        Ok(Self { values, summary })
    }
}

/// Results of running several batches of the same size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetStudy {
    /// Seed of the first set; set `i` uses `base_seed + i`.
    pub base_seed: u64,
    /// Number of sets.
    pub sets: usize,
    /// Games per set.
    pub games_per_set: usize,
    /// Games across all sets that hit the turn cap.
    pub anomalies: usize,
    /// Mean turns per set.
    pub mean: StatSeries,
    /// Median turns per set.
    pub median: StatSeries,
    /// Modal turns per set.
    pub mode: StatSeries,
    /// Population standard deviation per set.
    pub std_dev: StatSeries,
}

impl SetStudy {
    /// Run `sets` batches of `games_per_set` games each.
    pub fn run(runner: &BatchRunner, sets: usize, games_per_set: usize) -> StatsResult<Self> {
        if sets == 0 {
            return Err(CnlError::InvalidConfig("set count must be at least 1".into()).into());
        }
        let base_seed = runner.config().resolve_seed();
        log::debug!("running {sets} sets of {games_per_set} games from seed {base_seed}");

        let mut summaries = Vec::with_capacity(sets);
        let mut anomalies = 0;
        for i in 0..sets {
            let counts = runner
                .reseeded(base_seed.wrapping_add(i as u64))
                .run_turn_counts(games_per_set)?;
            anomalies += counts.anomalies;
            if counts.turns.is_empty() {
                return Err(StatsError::NoCompletedGames {
                    anomalies: counts.anomalies,
                });
            }
            summaries.push(TurnSummary::from_turns(&counts.turns)?);
        }

        let series = |f: fn(&TurnSummary) -> f64| -> StatsResult<StatSeries> {
            StatSeries::new(summaries.iter().map(f).collect())
        };
        Ok(Self {
            base_seed,
            sets,
            games_per_set,
            anomalies,
            mean: series(|s| s.mean)?,
            median: series(|s| s.median)?,
            mode: series(|s| f64::from(s.mode))?,
            std_dev: series(|s| s.std_dev)?,
        })
    }
}
