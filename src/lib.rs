//! # Burrow
//!
//! A turn-based dungeon crawler engine: procedurally carved levels, a single hero,
//! hostile monsters, items and gold, all resolved one discrete command at a time.
//!
//! ## Architecture Overview
//!
//! - **Game State**: [`GamePlay`] owns the level, the hero and the live monster
//!   registry, and resolves every command to completion before the next one
//! - **World**: a fixed grid of [`Cell`]s with a bidirectional occupancy invariant
//! - **Generation**: room-and-corridor carving plus a template [`Catalog`] that
//!   turns parsed monster/item definitions into live instances
//! - **Combat**: a pure roll-based attack resolution shared by hero and monsters
//! - **Pursuit**: greedy single-step monster movement toward the hero
//!
//! Rendering and input are thin collaborators: they read [`GamePlay::view`] and
//! drain [`GameEvent`]s, and dispatch one [`Command`] per user input.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Burrow engine.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Level is too small to hold even a single minimum-size room
    #[error("Invalid level dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },

    /// Generation configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A template list required for play is empty
    #[error("Catalog has no {0} templates")]
    EmptyCatalog(&'static str),

    /// A template definition line could not be parsed
    #[error("Malformed template on line {line}: {reason}")]
    CatalogFormat { line: usize, reason: String },

    /// No empty tile could be found within the retry budget
    #[error("Level is full: no empty tile after {attempts} attempts")]
    LevelFull { attempts: u32 },

    /// The hero has died or escaped; no further turns are possible
    #[error("The game session has ended")]
    SessionEnded,

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Hero starting (and maximum) hit points
    pub const HERO_STARTING_HEALTH: i32 = 300;

    /// Hero base accuracy before weapon bonuses
    pub const HERO_STARTING_ACCURACY: i32 = 80;

    /// Damage rating when no weapon is wielded
    pub const BARE_HANDED_DAMAGE: i32 = 10;

    /// Armor class when no armor is worn
    pub const UNARMORED_CLASS: i32 = 0;

    /// Evasion shared by every creature; variable evasion is not implemented
    pub const FIXED_EVASION: i32 = 50;

    /// Number of inventory slots, lettered from `a`
    pub const INVENTORY_SLOTS: usize = 10;

    /// Side length of the square map window centered on the hero
    pub const MAP_SIZE: i32 = 21;

    /// Number of narrative lines the display keeps
    pub const MAX_MESSAGES: usize = 50;

    /// Symbol drawn for the hero
    pub const HERO_SYMBOL: char = '@';

    /// Largest accepted level height or width
    pub const MAX_LEVEL_DIMENSION: i32 = 1_000;
}
