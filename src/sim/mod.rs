//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (bricks row-major, balls in spawn order)
//! - No rendering or platform dependencies

pub mod chain;
pub mod collision;
pub mod state;
pub mod tick;
pub mod view;

pub use chain::{BonusChain, ChainOutcome};
pub use collision::{BoundaryResult, point_in_rect, resolve_boundaries};
pub use state::{
    Ball, BonusMessage, Brick, BrickColor, BrickStatus, GameState, GameStatus, Paddle,
    initialize_balls, initialize_bricks,
};
pub use tick::{PaddleMove, apply_move, tick};
pub use view::Frame;
