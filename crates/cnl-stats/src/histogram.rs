//! Distribution of game lengths.

use serde::Serialize;

use crate::error::{StatsError, StatsResult};

/// Highest turn count with its own bucket unless told otherwise.
pub const DEFAULT_HISTOGRAM_MAX: u32 = 300;

/// Games per turn count, with longer games pooled in an overflow bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnHistogram {
    /// Highest turn count with its own bucket.
    pub max_turns: u32,
    /// `counts[t]` is the number of games that took `t` turns. Bucket 0
    /// stays empty since every game takes at least one turn, and buckets
    /// stop at the longest game seen or `max_turns`, whichever is lower.
    pub counts: Vec<u64>,
    /// Games longer than `max_turns`.
    pub overflow: u64,
}

impl TurnHistogram {
    /// Bucket `turns`, giving each count up to `max_turns` its own bucket.
    pub fn new(turns: &[u32], max_turns: u32) -> StatsResult<Self> {
        let longest = turns.iter().copied().max().ok_or(StatsError::EmptyInput)?;
        let mut counts = vec![0; longest.min(max_turns) as usize + 1];
        let mut overflow = 0;
        for &t in turns {
            match counts.get_mut(t as usize) {
                Some(bucket) => *bucket += 1,
                None => overflow += 1,
            }
        }
        Ok(Self {
            max_turns,
            counts,
            overflow,
        })
    }

    /// Total games counted, overflow included.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.overflow
    }

    /// Non-empty buckets as `(turns, games)` in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .zip(0..)
            .filter(|(count, _)| **count > 0)
            .map(|(&count, turns)| (turns, count))
    }
}

/// Bucket turn counts; see [`TurnHistogram::new`].
pub fn turn_histogram(turns: &[u32], max_turns: u32) -> StatsResult<TurnHistogram> {
    TurnHistogram::new(turns, max_turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_and_overflow() {
        let h = TurnHistogram::new(&[7, 7, 10, 12, 40], 12).unwrap();
        assert_eq!(h.counts.len(), 13);
        assert_eq!(h.counts[7], 2);
        assert_eq!(h.counts[10], 1);
        assert_eq!(h.counts[12], 1);
        assert_eq!(h.overflow, 1);
        assert_eq!(h.total(), 5);
        assert_eq!(h.occupied().collect::<Vec<_>>(), vec![(7, 2), (10, 1), (12, 1)]);
    }

    #[test]
    fn default_limit() {
        let h = turn_histogram(&[1, 300, 301], DEFAULT_HISTOGRAM_MAX).unwrap();
        assert_eq!(h.max_turns, 300);
        assert_eq!(h.counts[1], 1);
        assert_eq!(h.counts[300], 1);
        assert_eq!(h.overflow, 1);
    }

    #[test]
    fn buckets_stop_at_longest_game() {
        let h = TurnHistogram::new(&[5, 6, 6], u32::MAX).unwrap();
        assert_eq!(h.max_turns, u32::MAX);
        assert_eq!(h.counts.len(), 7);
        assert_eq!(h.counts[6], 2);
        assert_eq!(h.overflow, 0);
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            TurnHistogram::new(&[], DEFAULT_HISTOGRAM_MAX),
            Err(StatsError::EmptyInput)
        ));
    }
}
