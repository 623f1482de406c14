//! Central tendency and spread of game lengths.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{StatsError, StatsResult};

/// Arithmetic mean.
pub fn mean(values: &[u32]) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Ok(sum as f64 / values.len() as f64)
}

/// Middle value; the average of the two middle values for an even count.
pub fn median(values: &[u32]) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(f64::from(sorted[mid]))
    } else {
        Ok((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    }
}

/// Most frequent value. Ties go to the smallest value.
pub fn mode(values: &[u32]) -> StatsResult<u32> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut best: Option<(u32, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value).ok_or(StatsError::EmptyInput)
}

/// Population standard deviation (divides by N).
pub fn population_std_dev(values: &[u32]) -> StatsResult<f64> {
    let m = mean(values)?;
    let variance = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    Ok(variance.sqrt())
}

/// Summary statistics of the turn counts of completed games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnSummary {
    /// Number of games summarized.
    pub games: usize,
    /// Mean number of turns.
    pub mean: f64,
    /// Median number of turns.
    pub median: f64,
    /// Most common number of turns.
    pub mode: u32,
    /// Population standard deviation of the turn counts.
    pub std_dev: f64,
    /// Shortest game.
    pub min: u32,
    /// Longest game.
    pub max: u32,
}

impl TurnSummary {
    /// Summarize a list of turn counts.
    pub fn from_turns(turns: &[u32]) -> StatsResult<Self> {
        let (min, max) = turns
            .iter()
            .fold(None, |acc: Option<(u32, u32)>, &t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
            .ok_or(StatsError::EmptyInput)?;

        Ok(Self {
            games: turns.len(),
            mean: mean(turns)?,
            median: median(turns)?,
            mode: mode(turns)?,
            std_dev: population_std_dev(turns)?,
            min,
            max,
        })
    }
}

/// Five-number summary, as drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
}

impl BoxSummary {
    /// Summarize a list of values. Quartiles use linear interpolation
    /// between closest ranks.
    pub fn from_values(values: &[f64]) -> StatsResult<Self> {
        if values.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Distance between the first and third quartiles.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * p;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mode_of_reference_data() {
        assert_eq!(mode(&[3, 3, 5, 5, 5, 7]).unwrap(), 5);
    }

    #[test]
    fn mode_ties_go_to_smallest() {
        assert_eq!(mode(&[9, 9, 4, 4, 6]).unwrap(), 4);
        assert_eq!(mode(&[8, 2]).unwrap(), 2);
    }

    #[test]
    fn population_std_dev_of_reference_data() {
        assert_eq!(population_std_dev(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap(), 2.0);
    }

    #[test]
    fn std_dev_of_constant_is_zero() {
        assert_eq!(population_std_dev(&[7, 7, 7]).unwrap(), 0.0);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[5, 1, 3]).unwrap(), 3.0);
        assert_eq!(median(&[4, 1, 3, 2]).unwrap(), 2.5);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1, 2, 3, 4]).unwrap(), 2.5);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(mean(&[]), Err(StatsError::EmptyInput)));
        assert!(matches!(median(&[]), Err(StatsError::EmptyInput)));
        assert!(matches!(mode(&[]), Err(StatsError::EmptyInput)));
        assert!(matches!(population_std_dev(&[]), Err(StatsError::EmptyInput)));
        let err = TurnSummary::from_turns(&[]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn turn_summary_fields() {
        let s = TurnSummary::from_turns(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert_eq!(s.games, 8);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.median, 4.5);
        assert_eq!(s.mode, 4);
        assert_eq!(s.std_dev, 2.0);
        assert_eq!(s.min, 2);
        assert_eq!(s.max, 9);
    }

    #[test]
    fn box_summary_quartiles() {
        let b = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(b.min, 1.0);
        assert_eq!(b.q1, 2.0);
        assert_eq!(b.median, 3.0);
        assert_eq!(b.q3, 4.0);
        assert_eq!(b.max, 5.0);
        assert_eq!(b.iqr(), 2.0);

        let b = BoxSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(b.q1, 1.75);
        assert_eq!(b.median, 2.5);
        assert_eq!(b.q3, 3.25);
    }

    #[test]
    fn box_summary_single_value() {
        let b = BoxSummary::from_values(&[6.5]).unwrap();
        assert_eq!(b.min, 6.5);
        assert_eq!(b.max, 6.5);
        assert_eq!(b.median, 6.5);
    }

    proptest! {
        #[test]
        fn summary_is_ordered(turns in proptest::collection::vec(1u32..500, 1..200)) {
            let s = TurnSummary::from_turns(&turns).unwrap();
            prop_assert!(f64::from(s.min) <= s.median && s.median <= f64::from(s.max));
            prop_assert!(f64::from(s.min) <= s.mean && s.mean <= f64::from(s.max));
            prop_assert!(s.min <= s.mode && s.mode <= s.max);
            prop_assert!(s.std_dev >= 0.0);
        }
    }
}
