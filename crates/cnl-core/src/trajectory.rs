//! Single-game simulation.
//!
//! A game starts on square 0 and ends when the player lands on the final
//! square. Each turn draws one roll and resolves it with [`advance`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::Board;
use crate::dice::RollSource;

/// A game still running after this many turns gets one more; past that it
/// is stopped and flagged as an anomaly.
pub const DEFAULT_TURN_CAP: u32 = 2000;

/// What happened on a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    /// Moved to a plain square.
    Moved {
        /// The square landed on.
        to: u8,
    },
    /// Landed on a link source and followed it.
    Linked {
        /// The square landed on.
        from: u8,
        /// Where the link led.
        to: u8,
    },
    /// The roll would pass the final square; the player stays put.
    Overshot {
        /// The unchanged square.
        stay: u8,
    },
    /// Landed exactly on the final square.
    Finished {
        /// The final square.
        at: u8,
    },
}

impl Turn {
    /// The square the player occupies once the turn is over.
    pub fn position(self) -> u8 {
        match self {
            Self::Moved { to } | Self::Linked { to, .. } => to,
            Self::Overshot { stay } => stay,
            Self::Finished { at } => at,
        }
    }
}

/// Resolve one roll from `position`.
///
/// Link sources take priority over every other rule. Landing on a link's
/// destination never triggers a second link in the same turn.
pub fn advance(board: &Board, position: u8, roll: u8) -> Turn {
    let landing = position.saturating_add(roll);
    let last = board.final_position();

    if let Some(to) = board.link_destination(landing) {
        Turn::Linked { from: landing, to }
    } else if landing > last {
        Turn::Overshot { stay: position }
    } else if landing == last {
        Turn::Finished { at: last }
    } else {
        Turn::Moved { to: landing }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The player reached the final square.
    Finished,
    /// The game hit the turn cap without finishing.
    Anomaly,
}

/// The complete record of one simulated game.
///
/// Every turn appends the square occupied at the end of that turn,
/// including the winning turn, so `positions().len() == turn_count()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrajectoryRecord {
    turn_count: u32,
    positions: Vec<u8>,
    link_counts: BTreeMap<u8, u32>,
    outcome: Outcome,
}

impl TrajectoryRecord {
    /// Number of turns taken.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Square occupied after each turn, in turn order.
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    /// Traversal count per link source. Links never used are absent.
    pub fn link_counts(&self) -> &BTreeMap<u8, u32> {
        &self.link_counts
    }

    /// How many times the link starting on `source` was used.
    pub fn traversals(&self, source: u8) -> u32 {
        self.link_counts.get(&source).copied().unwrap_or(0)
    }

    /// Total link traversals across all links.
    pub fn total_traversals(&self) -> u32 {
        self.link_counts.values().sum()
    }

    /// How the game ended.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the game hit the turn cap.
    pub fn is_anomaly(&self) -> bool {
        self.outcome == Outcome::Anomaly
    }

    /// The square occupied when the game stopped.
    pub fn final_position(&self) -> u8 {
        self.positions.last().copied().unwrap_or(0)
    }

    /// Number of turns that ended on each square.
    pub fn visit_counts(&self) -> BTreeMap<u8, u32> {
        let mut visits = BTreeMap::new();
        for &square in &self.positions {
            *visits.entry(square).or_insert(0) += 1;
        }
        visits
    }
}

/// Drive one game to the final square, handing every turn to `on_turn`.
///
/// The game may use `turn_cap + 1` turns; one still running after that is
/// stopped and reported as [`Outcome::Anomaly`].
fn simulate<R, F>(board: &Board, rolls: &mut R, turn_cap: u32, mut on_turn: F) -> (u32, Outcome)
where
    R: RollSource + ?Sized,
    F: FnMut(Turn),
{
    let mut position = 0;
    let mut turn_count: u32 = 0;

    while !board.is_final(position) {
        if turn_count > turn_cap {
            log::warn!("game stopped past turn cap {turn_cap} on square {position}");
            return (turn_count, Outcome::Anomaly);
        }
        let turn = advance(board, position, rolls.roll());
        on_turn(turn);
        position = turn.position();
        turn_count += 1;
    }

    (turn_count, Outcome::Finished)
}

/// Play one game on `board`, drawing rolls from `rolls`.
///
/// A game still running after `turn_cap + 1` turns is stopped and returned
/// with [`Outcome::Anomaly`].
pub fn play_game<R: RollSource + ?Sized>(
    board: &Board,
    rolls: &mut R,
    turn_cap: u32,
) -> TrajectoryRecord {
    let mut positions = Vec::with_capacity(64);
    let mut link_counts = BTreeMap::new();

    let (turn_count, outcome) = simulate(board, rolls, turn_cap, |turn| {
        if let Turn::Linked { from, .. } = turn {
            *link_counts.entry(from).or_insert(0) += 1;
        }
        positions.push(turn.position());
    });

    TrajectoryRecord {
        turn_count,
        positions,
        link_counts,
        outcome,
    }
}

/// Play one game keeping only its length.
pub fn count_turns<R: RollSource + ?Sized>(
    board: &Board,
    rolls: &mut R,
    turn_cap: u32,
) -> (u32, Outcome) {
    simulate(board, rolls, turn_cap, |_| {})
}
