//! # Rendering Module
//!
//! Plain-text output for the terminal driver. Nothing here mutates a session;
//! the display reads [`GamePlay`](crate::GamePlay) and the events it drained.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
