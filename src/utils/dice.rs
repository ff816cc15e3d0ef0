//! # Dice
//!
//! Random number sources for generation and combat.
//!
//! Everything random in Burrow draws through the [`Roller`] trait so that a
//! seeded [`GameRng`] reproduces a whole session, and a [`ScriptedRoller`]
//! can pin individual rolls in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A source of uniform integer rolls.
pub trait Roller {
    /// Uniform integer in `low..=high`. Returns `low` when `high < low`.
    fn range(&mut self, low: i32, high: i32) -> i32;

    /// Fair coin flip.
    fn coin(&mut self) -> bool {
        self.range(0, 1) == 1
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.range(0, len as i32 - 1) as usize
    }

    /// Sum of `dice` independent rolls in `1..=faces`.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{GameRng, Roller};
    ///
    /// let mut rng = GameRng::new(7);
    /// let total = rng.roll(3, 6);
    /// assert!((3..=18).contains(&total));
    /// ```
    fn roll(&mut self, dice: u32, faces: u32) -> u32 {
        if faces == 0 {
            return 0;
        }
        (0..dice).map(|_| self.range(1, faces as i32) as u32).sum()
    }
}

/// Seeded game random number generator.
///
/// Wraps [`StdRng`]. Only the seed is serialized; a restored generator starts
/// the stream over from that seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    seed: u64,
}

impl GameRng {
    /// Creates a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Roller for GameRng {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

/// Replays a fixed sequence of rolls.
///
/// Each call to [`Roller::range`] consumes the next scripted value and clamps
/// it into the requested bounds. Once the script runs out every roll returns
/// the low bound.
///
/// # Examples
///
/// ```
/// use burrow::{Roller, ScriptedRoller};
///
/// let mut roller = ScriptedRoller::new([5, 99, -3]);
/// assert_eq!(roller.range(0, 10), 5);
/// assert_eq!(roller.range(0, 10), 10);
/// assert_eq!(roller.range(0, 10), 0);
/// assert_eq!(roller.range(2, 10), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedRoller {
    script: VecDeque<i32>,
}

impl ScriptedRoller {
    /// Creates a roller that will replay `values` in order.
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    /// Appends more values to the end of the script.
    pub fn extend(&mut self, values: impl IntoIterator<Item = i32>) {
        self.script.extend(values);
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Roller for ScriptedRoller {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        match self.script.pop_front() {
            Some(value) if high >= low => value.clamp(low, high),
            _ => low,
        }
    }
}
