//! # Game Module
//!
//! Core game state management, world representation, and creature systems.
//!
//! This module contains the fundamental building blocks of a Burrow session:
//! - The turn engine and its persistence
//! - The level grid and its occupancy model
//! - Creatures (hero and monsters) and the items they carry
//! - Combat resolution and the narrative events it produces

pub mod actions;
pub mod combat;
pub mod entities;
pub mod equipment;
pub mod state;
pub mod world;

pub use actions::*;
pub use combat::*;
pub use entities::*;
pub use equipment::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// A (row, column) coordinate on a level grid.
///
/// Row 0 is the top edge of the level; column 0 is the left edge.
///
/// # Examples
///
/// ```
/// use burrow::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.row, 10);
/// assert_eq!(pos.col, 5);
///
/// let adjacent = pos.adjacent_positions();
/// assert_eq!(adjacent.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Squared Euclidean distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Position;
    ///
    /// let a = Position::new(0, 0);
    /// let b = Position::new(3, 4);
    /// assert_eq!(a.distance_squared(b), 25);
    /// ```
    pub fn distance_squared(self, other: Position) -> i32 {
        let dr = self.row - other.row;
        let dc = self.col - other.col;
        dr * dr + dc * dc
    }

    /// Returns the position offset by the given row and column deltas.
    pub fn offset(self, row_delta: i32, col_delta: i32) -> Self {
        Self::new(self.row + row_delta, self.col + col_delta)
    }

    /// Returns all 8 adjacent positions in row-major scan order
    /// (north-west first, south-east last).
    pub fn adjacent_positions(self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(8);
        for row_delta in -1..=1 {
            for col_delta in -1..=1 {
                if row_delta == 0 && col_delta == 0 {
                    continue;
                }
                positions.push(self.offset(row_delta, col_delta));
            }
        }
        positions
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Directions for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a (row, column) delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(-1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(-1, 0),
            Direction::South => Position::new(1, 0),
            Direction::East => Position::new(0, 1),
            Direction::West => Position::new(0, -1),
            Direction::Northeast => Position::new(-1, 1),
            Direction::Northwest => Position::new(-1, -1),
            Direction::Southeast => Position::new(1, 1),
            Direction::Southwest => Position::new(1, -1),
        }
    }

    /// Returns all 8 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ]
    }
}

/// Identifier of a monster within one session.
///
/// Ids are handed out sequentially and never reused, so a stale id simply
/// fails to resolve once its monster has been removed from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterId(pub u32);

impl std::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "monster#{}", self.0)
    }
}
