//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (milliseconds for frame pacing and FPS)
//! - Input events (key names to paddle moves and preference toggles)

pub mod input;
pub mod time;

pub use input::{key_to_move, key_to_toggle};
pub use time::now_ms;
