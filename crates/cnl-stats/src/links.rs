//! How often links are used, and what they cost.
//!
//! Only completed games count; records flagged as anomalies are skipped.

use serde::Serialize;

use cnl_core::{Board, LinkKind, TrajectoryRecord};

use crate::error::{StatsError, StatsResult};

/// Records of games that reached the final square.
pub(crate) fn completed(records: &[TrajectoryRecord]) -> StatsResult<Vec<&TrajectoryRecord>> {
    if records.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let done: Vec<_> = records.iter().filter(|r| !r.is_anomaly()).collect();
    if done.is_empty() {
        return Err(StatsError::NoCompletedGames {
            anomalies: records.len(),
        });
    }
    Ok(done)
}

/// Times the link starting on `source` was used across all completed games.
pub fn total_traversals(records: &[TrajectoryRecord], source: u8) -> StatsResult<u64> {
    Ok(completed(records)?
        .iter()
        .map(|r| u64::from(r.traversals(source)))
        .sum())
}

/// Average uses of the link starting on `source` per completed game.
pub fn average_traversals_per_game(records: &[TrajectoryRecord], source: u8) -> StatsResult<f64> {
    let games = completed(records)?.len();
    Ok(total_traversals(records, source)? as f64 / games as f64)
}

/// Usage of one link across a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkFrequency {
    /// Source square.
    pub from: u8,
    /// Destination square.
    pub to: u8,
    /// Chute or ladder.
    pub kind: LinkKind,
    /// Total traversals across completed games.
    pub total: u64,
    /// Average traversals per completed game.
    pub per_game: f64,
}

/// Usage of every link on `board`, in ascending order of source square.
pub fn link_frequencies(
    records: &[TrajectoryRecord],
    board: &Board,
) -> StatsResult<Vec<LinkFrequency>> {
    let done = completed(records)?;
    let games = done.len() as f64;

    Ok(board
        .links()
        .map(|link| {
            let total: u64 = done
                .iter()
                .map(|r| u64::from(r.traversals(link.from)))
                .sum();
            LinkFrequency {
                from: link.from,
                to: link.to,
                kind: link.kind(),
                total,
                per_game: total as f64 / games,
            }
        })
        .collect())
}

/// Game length among games that used a link exactly `traversals` times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalTurns {
    /// Number of times the link was used.
    pub traversals: u32,
    /// Number of completed games with exactly that many uses.
    pub games: usize,
    /// Mean turns of those games; `None` when no game matched.
    pub mean_turns: Option<f64>,
}

/// Mean game length for each traversal count of the link starting on
/// `source`, from 0 up to the highest count observed.
pub fn conditional_mean_turns(
    records: &[TrajectoryRecord],
    source: u8,
) -> StatsResult<Vec<ConditionalTurns>> {
    let done = completed(records)?;
    let max = done.iter().map(|r| r.traversals(source)).max().unwrap_or(0);

    let mut sums = vec![(0u64, 0usize); max as usize + 1];
    for record in &done {
        let slot = &mut sums[record.traversals(source) as usize];
        slot.0 += u64::from(record.turn_count());
        slot.1 += 1;
    }

    Ok(sums
        .into_iter()
        .zip(0..)
        .map(|((turns, games), traversals)| ConditionalTurns {
            traversals,
            games,
            mean_turns: (games > 0).then(|| turns as f64 / games as f64),
        })
        .collect())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use cnl_core::{Board, DEFAULT_TURN_CAP, ScriptedRolls, TrajectoryRecord, play_game};

    /// A board whose only link is a chute from 3 back to 2.
    pub fn short_chute_board() -> Board {
        Board::new([(3, 2)]).unwrap()
    }

    /// A game on [`short_chute_board`] that takes the chute `k` times and
    /// lasts `k + 17` turns (18 when `k == 0`).
    pub fn game_with_chutes(k: u32) -> TrajectoryRecord {
        let mut script = if k == 0 {
            vec![2]
        } else {
            let mut s = vec![3];
            s.extend(std::iter::repeat_n(1, k as usize - 1));
            s
        };
        script.extend([6; 16]);
        script.push(2);
        play_game(
            &short_chute_board(),
            &mut ScriptedRolls::new(&script).unwrap(),
            DEFAULT_TURN_CAP,
        )
    }

    /// A game that hits a tiny turn cap.
    pub fn anomalous_game() -> TrajectoryRecord {
        play_game(&short_chute_board(), &mut ScriptedRolls::new(&[6]).unwrap(), 2)
    }
}
