//! # Utilities Module
//!
//! Dice rolling and monster pursuit helpers.

pub mod dice;
pub mod pursuit;

pub use dice::*;
pub use pursuit::*;
