//! Board model and game simulation for Chutes and Ladders.
//!
//! Models the single-player race on the standard 100-square board: one
//! six-sided roll per turn, links that relocate the player, and the rule
//! that the final square must be reached exactly. Games can be played one
//! at a time with any [`RollSource`] or in seeded batches with
//! [`BatchRunner`].

/// Batches of independent games, sequential or parallel.
pub mod batch;
/// Board layout: link table and final square.
pub mod board;
/// Configuration for batch runs.
pub mod config;
/// Roll sources: seeded die and scripted rolls.
pub mod dice;
/// Error types for the simulation core.
pub mod error;
/// Turn resolution and single-game records.
pub mod trajectory;

pub use batch::{Batch, BatchRunner, CancelToken, TurnCounts};
pub use board::{Board, ChuteVariant, FINAL_POSITION, Link, LinkKind, VARIANT_CHUTE_START};
pub use config::SimConfig;
pub use dice::{RollSource, ScriptedRolls, SeededDie};
pub use error::{BoardIssue, CnlError, CnlResult};
pub use trajectory::{
    DEFAULT_TURN_CAP, Outcome, TrajectoryRecord, Turn, advance, count_turns, play_game,
};
