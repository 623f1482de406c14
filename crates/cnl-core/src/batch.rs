//! Running many independent games.
//!
//! A sequential batch draws every game from one RNG stream seeded once per
//! batch. A parallel batch splits the games into fixed-size chunks, each
//! with its own stream derived from the batch seed and the chunk index.
//! Parallel results are reproducible for a given seed no matter how many
//! threads run them, but they differ from the sequential results for the
//! same seed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::board::Board;
use crate::config::SimConfig;
use crate::dice::SeededDie;
use crate::error::{CnlError, CnlResult};
use crate::trajectory::{Outcome, TrajectoryRecord, count_turns, play_game};

/// Games per independent RNG stream in parallel mode.
pub const CHUNK_SIZE: usize = 1024;

/// A shared flag for stopping a running batch from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every batch holding this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The records of a finished batch, indexed by game number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    seed: u64,
    records: Vec<TrajectoryRecord>,
}

impl Batch {
    /// The seed the batch was drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All records in game order.
    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    /// Number of games in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no games.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of games that hit the turn cap.
    pub fn anomalies(&self) -> usize {
        self.records.iter().filter(|r| r.is_anomaly()).count()
    }

    /// Turn counts of the games that finished.
    pub fn turn_counts(&self) -> Vec<u32> {
        self.records
            .iter()
            .filter(|r| !r.is_anomaly())
            .map(TrajectoryRecord::turn_count)
            .collect()
    }

    /// Take ownership of the records.
    pub fn into_records(self) -> Vec<TrajectoryRecord> {
        self.records
    }
}

/// Game lengths without per-game detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnCounts {
    /// The seed the games were drawn from.
    pub seed: u64,
    /// Turn counts of the games that finished, in game order.
    pub turns: Vec<u32>,
    /// Number of games that hit the turn cap.
    pub anomalies: usize,
}

/// Runs batches of games on one board.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    board: Board,
    config: SimConfig,
    cancel: CancelToken,
}

impl BatchRunner {
    /// Create a runner on the standard board for `config.variant`.
    pub fn new(config: SimConfig) -> CnlResult<Self> {
        let board = Board::standard_variant(config.variant);
        Self::with_board(board, config)
    }

    /// Create a runner on a custom board.
    pub fn with_board(board: Board, config: SimConfig) -> CnlResult<Self> {
        config.validate()?;
        Ok(Self {
            board,
            config,
            cancel: CancelToken::new(),
        })
    }

    /// Attach a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A copy of this runner drawing from `seed`, sharing the cancel token.
    pub fn reseeded(&self, seed: u64) -> Self {
        let mut runner = self.clone();
        runner.config.seed = Some(seed);
        runner
    }

    /// The board games are played on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The runner configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Play `n` games and keep every record.
    pub fn run(&self, n: usize) -> CnlResult<Batch> {
        let seed = self.start(n)?;
        let deadline = self.deadline();
        let cap = self.config.turn_cap;

        let records: Vec<TrajectoryRecord> = if self.config.parallel {
            self.run_chunks(n, seed, deadline, |die, len| {
                (0..len).map(|_| play_game(&self.board, &mut *die, cap)).collect()
            })?
        } else {
            let mut die = SeededDie::new(seed);
            let mut records = Vec::with_capacity(n);
            for completed in 0..n {
                self.checkpoint(completed, deadline)?;
                records.push(play_game(&self.board, &mut die, cap));
            }
            records
        };

        let batch = Batch { seed, records };
        let anomalies = batch.anomalies();
        if anomalies > 0 {
            log::warn!("{anomalies} of {n} games hit the turn cap");
        }
        Ok(batch)
    }

    /// Play `n` games keeping only how long each took.
    pub fn run_turn_counts(&self, n: usize) -> CnlResult<TurnCounts> {
        let seed = self.start(n)?;
        let deadline = self.deadline();
        let cap = self.config.turn_cap;

        let results: Vec<(u32, Outcome)> = if self.config.parallel {
            self.run_chunks(n, seed, deadline, |die, len| {
                (0..len).map(|_| count_turns(&self.board, &mut *die, cap)).collect()
            })?
        } else {
            let mut die = SeededDie::new(seed);
            let mut results = Vec::with_capacity(n);
            for completed in 0..n {
                self.checkpoint(completed, deadline)?;
                results.push(count_turns(&self.board, &mut die, cap));
            }
            results
        };

        let mut turns = Vec::with_capacity(results.len());
        let mut anomalies = 0;
        for (count, outcome) in results {
            match outcome {
                Outcome::Finished => turns.push(count),
                Outcome::Anomaly => anomalies += 1,
            }
        }
        if anomalies > 0 {
            log::warn!("{anomalies} of {n} games hit the turn cap");
        }
        Ok(TurnCounts {
            seed,
            turns,
            anomalies,
        })
    }

    fn start(&self, n: usize) -> CnlResult<u64> {
        if n == 0 {
            return Err(CnlError::InvalidCount(n));
        }
        let seed = self.config.resolve_seed();
        log::debug!(
            "running {n} games (seed {seed}, parallel {})",
            self.config.parallel
        );
        Ok(seed)
    }

    fn deadline(&self) -> Option<Instant> {
        self.config.timeout.map(|t| Instant::now() + t)
    }

    fn checkpoint(&self, completed: usize, deadline: Option<Instant>) -> CnlResult<()> {
        let expired = deadline.is_some_and(|d| Instant::now() >= d);
        if self.cancel.is_cancelled() || expired {
            log::info!("batch stopped after {completed} games");
            return Err(CnlError::Cancelled { completed });
        }
        Ok(())
    }

    /// Split `n` games into chunks with independent streams and run them on
    /// the rayon pool, preserving game order.
    fn run_chunks<T, F>(
        &self,
        n: usize,
        seed: u64,
        deadline: Option<Instant>,
        play: F,
    ) -> CnlResult<Vec<T>>
    where
        T: Send,
        F: Fn(&mut SeededDie, usize) -> Vec<T> + Sync,
    {
        let completed = AtomicUsize::new(0);
        let chunks: Vec<Vec<T>> = (0..n.div_ceil(CHUNK_SIZE))
            .into_par_iter()
            .map(|chunk| -> CnlResult<Vec<T>> {
                self.checkpoint(completed.load(Ordering::Relaxed), deadline)?;
                let len = CHUNK_SIZE.min(n - chunk * CHUNK_SIZE);
                let mut die = SeededDie::new(chunk_seed(seed, chunk));
                let results = play(&mut die, len);
                completed.fetch_add(len, Ordering::Relaxed);
                Ok(results)
            })
            .collect::<CnlResult<_>>()?;

        let mut out = Vec::with_capacity(n);
        for chunk in chunks {
            out.extend(chunk);
        }
        Ok(out)
    }
}

/// Derive an independent stream seed for one chunk (SplitMix64 finalizer).
fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    let mut z = seed
        .wrapping_add(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((chunk as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
