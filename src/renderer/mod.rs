//! Rendering module
//!
//! Draws a `sim::Frame` onto a 2D canvas. Color choices live here so they can
//! be tested off the browser; the canvas backend itself is wasm-only.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::view::BrickView;

pub const BACKGROUND: &str = "#ffffff";
pub const BALL_FILL: &str = "#FF5733";
pub const PADDLE_FILL: &str = "black";
pub const BONUS_FILL: &str = "red";
pub const BONUS_FONT: &str = "30px Arial";
pub const HUD_FONT: &str = "12px monospace";

/// Brick fill, optionally swapped for a high contrast palette
pub fn brick_fill(brick: &BrickView, high_contrast: bool) -> &'static str {
    if !high_contrast {
        return brick.color;
    }
    match brick.color {
        "#00FF40" => "#FFD400",
        "#03C03C" => "#0057FF",
        _ => "#D0006F",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Frame, GameState};

    #[test]
    fn test_normal_palette_passthrough() {
        let frame = Frame::capture(&GameState::new());
        for brick in &frame.bricks {
            assert_eq!(brick_fill(brick, false), brick.color);
        }
    }

    #[test]
    fn test_high_contrast_keeps_colors_distinct() {
        let frame = Frame::capture(&GameState::new());
        let fills: Vec<_> = frame.bricks[..3]
            .iter()
            .map(|b| brick_fill(b, true))
            .collect();
        assert_ne!(fills[0], fills[1]);
        assert_ne!(fills[1], fills[2]);
        assert_ne!(fills[0], fills[2]);
        // Matching bricks still match
        assert_eq!(brick_fill(&frame.bricks[0], true), brick_fill(&frame.bricks[3], true));
    }
}
