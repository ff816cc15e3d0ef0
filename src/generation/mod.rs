//! # Generation Module
//!
//! Procedural content generation: level carving, monster and item templates,
//! and the catalog that turns templates into live instances.
//!
//! Everything here draws randomness from a [`Roller`], so a seeded
//! [`GameRng`](crate::GameRng) reproduces the same dungeon.

pub mod catalog;
pub mod dungeon;
pub mod encounters;
pub mod items;

pub use catalog::*;
pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::game::Position;
use crate::utils::Roller;
use crate::{config, BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Ranges are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Level height in cells, including the wall border
    pub rows: i32,
    /// Level width in cells, including the wall border
    pub cols: i32,
    pub min_rooms: i32,
    pub max_rooms: i32,
    pub room_min_height: i32,
    pub room_max_height: i32,
    pub room_min_width: i32,
    pub room_max_width: i32,
    pub min_monsters: i32,
    pub max_monsters: i32,
    pub min_items: i32,
    pub max_items: i32,
    pub min_gold_piles: i32,
    pub max_gold_piles: i32,
    /// Depth of the bottom level; descending from it escapes the dungeon
    pub max_depth: u32,
    /// Random draws allowed when looking for an empty tile
    pub empty_tile_attempts: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rows: 40,
            cols: 80,
            min_rooms: 6,
            max_rooms: 12,
            room_min_height: 3,
            room_max_height: 8,
            room_min_width: 4,
            room_max_width: 14,
            min_monsters: 4,
            max_monsters: 8,
            min_items: 3,
            max_items: 6,
            min_gold_piles: 3,
            max_gold_piles: 6,
            max_depth: 10,
            empty_tile_attempts: 10_000,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            rows: 20,
            cols: 30,
            min_rooms: 2,
            max_rooms: 4,
            room_min_height: 3,
            room_max_height: 5,
            room_min_width: 4,
            room_max_width: 8,
            min_monsters: 1,
            max_monsters: 2,
            min_items: 1,
            max_items: 2,
            min_gold_piles: 1,
            max_gold_piles: 2,
            max_depth: 3,
            empty_tile_attempts: 10_000,
        }
    }

    /// Checks that the configuration can produce a level.
    pub fn validate(&self) -> BurrowResult<()> {
        let too_small = self.rows < self.room_min_height.saturating_add(2)
            || self.cols < self.room_min_width.saturating_add(2);
        let too_large =
            self.rows > config::MAX_LEVEL_DIMENSION || self.cols > config::MAX_LEVEL_DIMENSION;
        if too_small || too_large {
            return Err(BurrowError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let ranges = [
            ("rooms", self.min_rooms, self.max_rooms),
            ("room height", self.room_min_height, self.room_max_height),
            ("room width", self.room_min_width, self.room_max_width),
            ("monsters", self.min_monsters, self.max_monsters),
            ("items", self.min_items, self.max_items),
            ("gold piles", self.min_gold_piles, self.max_gold_piles),
        ];
        for (what, min, max) in ranges {
            if min < 0 || max < min {
                return Err(BurrowError::InvalidConfig(format!(
                    "{} range {}..={} is invalid",
                    what, min, max
                )));
            }
        }

        if self.min_rooms < 1 || self.room_min_height < 1 || self.room_min_width < 1 {
            return Err(BurrowError::InvalidConfig(
                "a level needs at least one room of at least one cell".to_string(),
            ));
        }
        if self.max_depth < 1 {
            return Err(BurrowError::InvalidConfig("max_depth must be at least 1".to_string()));
        }
        if self.empty_tile_attempts < 1 {
            return Err(BurrowError::InvalidConfig(
                "empty_tile_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads a configuration from JSON; missing fields take default values.
    pub fn from_json(json: &str) -> BurrowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room carved into a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left floor cell
    pub top_left: Position,
    pub height: i32,
    pub width: i32,
}

impl Room {
    pub fn new(top_left: Position, height: i32, width: i32) -> Self {
        Self {
            top_left,
            height,
            width,
        }
    }

    /// Bottom-right floor cell.
    pub fn bottom_right(&self) -> Position {
        self.top_left.offset(self.height - 1, self.width - 1)
    }

    pub fn area(&self) -> i32 {
        self.height * self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        let bottom_right = self.bottom_right();
        pos.row >= self.top_left.row
            && pos.row <= bottom_right.row
            && pos.col >= self.top_left.col
            && pos.col <= bottom_right.col
    }

    /// All cells of the room in row-major order.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area().max(0) as usize);
        for row in 0..self.height {
            for col in 0..self.width {
                positions.push(self.top_left.offset(row, col));
            }
        }
        positions
    }

    /// Uniformly random cell inside the room.
    pub fn random_position(&self, rng: &mut dyn Roller) -> Position {
        let bottom_right = self.bottom_right();
        Position::new(
            rng.range(self.top_left.row, bottom_right.row),
            rng.range(self.top_left.col, bottom_right.col),
        )
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and roller.
    fn generate(&self, config: &GenerationConfig, rng: &mut dyn Roller) -> BurrowResult<T>;

    /// Checks generated content against the generator's guarantees.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BurrowResult<()>;
}
