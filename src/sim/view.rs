//! Read-only render snapshot
//!
//! Presentation never touches `GameState` directly; it draws a `Frame`.

use serde::Serialize;

use super::state::{GameState, GameStatus};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// CSS color
    pub color: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonusView {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

/// Everything needed to draw one frame and the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub balls: Vec<BallView>,
    pub bricks: Vec<BrickView>,
    pub paddle: PaddleView,
    pub bonus: BonusView,
    pub score: u64,
    pub level: u32,
    pub status: GameStatus,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            balls: state
                .balls
                .iter()
                .map(|b| BallView {
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: BALL_RADIUS,
                })
                .collect(),
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    x: b.pos.x,
                    y: b.pos.y,
                    width: BRICK_WIDTH,
                    height: BRICK_HEIGHT,
                    color: b.color.hex(),
                    active: b.is_active(),
                })
                .collect(),
            paddle: PaddleView {
                x: state.paddle.x,
                y: state.paddle.y(),
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
            },
            bonus: BonusView {
                text: state.bonus.text.clone(),
                x: state.bonus.pos.x,
                y: state.bonus.pos.y,
                visible: state.bonus_visible(),
            },
            score: state.score,
            level: state.level,
            status: state.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_fresh_state() {
        let frame = Frame::capture(&GameState::new());
        assert_eq!(frame.width, 580.0);
        assert_eq!(frame.height, 520.0);
        assert_eq!(frame.balls.len(), 1);
        assert_eq!(frame.bricks.len(), 6);
        assert!(frame.bricks.iter().all(|b| b.active));
        assert_eq!(frame.bricks[0].color, "#00FF40");
        assert_eq!(frame.paddle.y, 505.0);
        assert!(!frame.bonus.visible);
        assert_eq!(frame.status, GameStatus::NotStarted);
    }

    #[test]
    fn test_frame_serializes_to_json() {
        let frame = Frame::capture(&GameState::new());
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["status"], "NotStarted");
        assert_eq!(json["level"], 1);
        assert_eq!(json["bricks"].as_array().map(|b| b.len()), Some(6));
    }
}
