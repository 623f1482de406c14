//! Batch-level statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use cnl_core::TrajectoryRecord;

use crate::error::StatsResult;
use crate::links::completed;
use crate::summary::TurnSummary;

/// Everything reported about one batch of games.
///
/// Built once from the records; link totals are kept per source square so
/// any link can be queried afterwards without another pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Completed games.
    pub games: usize,
    /// Games that hit the turn cap.
    pub anomalies: usize,
    /// Turn statistics over completed games.
    pub turns: TurnSummary,
    /// Total traversals per link source over completed games.
    pub link_totals: BTreeMap<u8, u64>,
}

impl AggregateStats {
    /// Aggregate a batch of records.
    pub fn from_records(records: &[TrajectoryRecord]) -> StatsResult<Self> {
        let done = completed(records)?;

        let turns: Vec<u32> = done.iter().map(|r| r.turn_count()).collect();
        let mut link_totals = BTreeMap::new();
        for record in &done {
            for (&source, &count) in record.link_counts() {
                *link_totals.entry(source).or_insert(0) += u64::from(count);
            }
        }

        let stats = Self {
            games: done.len(),
            anomalies: records.len() - done.len(),
            turns: TurnSummary::from_turns(&turns)?,
            link_totals,
        };
        log::debug!(
            "aggregated {} games ({} anomalies), mean {:.2} turns",
            stats.games,
            stats.anomalies,
            stats.turns.mean
        );
        Ok(stats)
    }

    /// Times the link on `source` was used.
    pub fn total_traversals(&self, source: u8) -> u64 {
        self.link_totals.get(&source).copied().unwrap_or(0)
    }

    /// Average uses of the link on `source` per completed game.
    pub fn average_traversals_per_game(&self, source: u8) -> f64 {
        self.total_traversals(source) as f64 / self.games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::links::fixtures::*;

    #[test]
    fn aggregates_completed_games() {
        let records = vec![
            game_with_chutes(0),
            game_with_chutes(2),
            game_with_chutes(4),
            anomalous_game(),
        ];
        let stats = AggregateStats::from_records(&records).unwrap();
        assert_eq!(stats.games, 3);
        assert_eq!(stats.anomalies, 1);
        assert_eq!(stats.turns.min, 18);
        assert_eq!(stats.turns.max, 21);
        assert_eq!(stats.total_traversals(3), 6);
        assert_eq!(stats.average_traversals_per_game(3), 2.0);
        assert_eq!(stats.total_traversals(40), 0);
    }

    #[test]
    fn matches_free_functions() {
        let records = vec![game_with_chutes(1), game_with_chutes(5)];
        let stats = AggregateStats::from_records(&records).unwrap();
        assert_eq!(
            stats.total_traversals(3),
            crate::links::total_traversals(&records, 3).unwrap()
        );
    }

    #[test]
    fn no_completed_games() {
        let err = AggregateStats::from_records(&[anomalous_game()]).unwrap_err();
        assert!(matches!(err, StatsError::NoCompletedGames { anomalies: 1 }));
    }

    #[test]
    fn serializes_to_json() {
        let stats = AggregateStats::from_records(&[game_with_chutes(1)]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["games"], 1);
        assert_eq!(json["turns"]["mode"], 18);
        assert_eq!(json["link_totals"]["3"], 1);
    }
}
