//! Collision detection and boundary response
//!
//! Everything is axis-aligned: bricks are rectangles, the walls and ceiling
//! are fixed margins, and the floor is either the paddle or a miss.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::*;

/// What happened to a ball at the canvas boundary this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryResult {
    /// Still in play (possibly after bouncing)
    InPlay,
    /// Reached the floor outside the paddle
    Missed,
}

/// Strict point-in-rectangle test: points on an edge are outside
#[inline]
pub fn point_in_rect(point: Vec2, min: Vec2, size: Vec2) -> bool {
    let max = min + size;
    point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
}

/// Bounce a ball off the side walls, ceiling and paddle.
///
/// Tests use the position one tick ahead. Only reflects velocity; the caller
/// advances the ball if it is still in play.
pub fn resolve_boundaries(ball: &mut Ball, paddle: &Paddle) -> BoundaryResult {
    let next = ball.next_pos();

    if next.x > CANVAS_WIDTH - WALL_MARGIN || next.x < WALL_MARGIN {
        ball.reflect_x();
    }

    if next.y < WALL_MARGIN {
        ball.reflect_y();
    } else if next.y > CANVAS_HEIGHT - WALL_MARGIN {
        // Paddle coverage is judged on the current x, not the predicted one
        if paddle.spans(ball.pos.x) {
            ball.reflect_y();
        } else {
            return BoundaryResult::Missed;
        }
    }

    BoundaryResult::InPlay
}
