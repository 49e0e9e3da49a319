//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to game actions)
//! - Time/ticks (fixed-step frame clock)

pub mod input;
pub mod time;

pub use input::{InputEvent, action_for};
pub use time::FrameClock;
