//! Die rolls that drive a game.
//!
//! The simulator draws from a [`RollSource`], so a seeded die and a fixed
//! script of rolls are interchangeable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CnlError, CnlResult};

/// Number of faces on the spinner/die.
pub const DIE_SIDES: u8 = 6;

/// Something that produces one die roll per turn.
pub trait RollSource {
    /// Produce the next roll, in `1..=DIE_SIDES`.
    fn roll(&mut self) -> u8;
}

/// A fair six-sided die backed by a seeded RNG.
#[derive(Debug, Clone)]
pub struct SeededDie {
    rng: StdRng,
}

impl SeededDie {
    /// Create a die whose roll sequence is fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Wrap an existing RNG.
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl RollSource for SeededDie {
    fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=DIE_SIDES)
    }
}

/// A fixed sequence of rolls, repeated from the start once exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<u8>,
    next: usize,
}

impl ScriptedRolls {
    /// Create a script. Every value must be a face of the die, and the
    /// script must not be empty.
    pub fn new(rolls: &[u8]) -> CnlResult<Self> {
        if rolls.is_empty() {
            return Err(CnlError::InvalidConfig("roll script is empty".into()));
        }
        if let Some((index, roll)) = rolls
            .iter()
            .enumerate()
            .find(|(_, r)| !(1..=DIE_SIDES).contains(*r))
        {
            return Err(CnlError::InvalidConfig(format!(
                "scripted roll {roll} at index {index} is not in 1-{DIE_SIDES}"
            )));
        }
        Ok(Self {
            rolls: rolls.to_vec(),
            next: 0,
        })
    }

    /// How many rolls have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> u8 {
        let value = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        value
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_die_stays_in_range() {
        let mut die = SeededDie::new(42);
        for _ in 0..1000 {
            assert!((1..=DIE_SIDES).contains(&die.roll()));
        }
    }

    #[test]
    fn seeded_die_is_deterministic() {
        let mut a = SeededDie::new(99);
        let mut b = SeededDie::new(99);
        let ra: Vec<u8> = (0..50).map(|_| a.roll()).collect();
        let rb: Vec<u8> = (0..50).map(|_| b.roll()).collect();
        assert_eq!(ra, rb);
    }

    #[test]
    fn seeded_die_hits_every_face() {
        let mut die = SeededDie::new(7);
        let mut seen = [false; DIE_SIDES as usize];
        for _ in 0..600 {
            seen[usize::from(die.roll() - 1)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn script_cycles() {
        let mut script = ScriptedRolls::new(&[1, 2, 3]).unwrap();
        let rolls: Vec<u8> = (0..7).map(|_| script.roll()).collect();
        assert_eq!(rolls, vec![1, 2, 3, 1, 2, 3, 1]);
        assert_eq!(script.drawn(), 7);
    }

    #[test]
    fn script_rejects_faces_off_the_die() {
        let err = ScriptedRolls::new(&[3, 0, 2]).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("index 1"));
        assert!(ScriptedRolls::new(&[7]).is_err());
        assert!(ScriptedRolls::new(&[1, 6]).is_ok());
    }

    #[test]
    fn empty_script_rejected() {
        assert!(matches!(
            ScriptedRolls::new(&[]),
            Err(CnlError::InvalidConfig(_))
        ));
    }
}
