//! Chain Breaker - a brick-breaker with same-color chain bonuses
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, chain scoring, game state)
//! - `session`: Session control surface (start/reset/next level, input, epochs)
//! - `renderer`: Canvas 2D drawing of simulation snapshots
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Runtime configuration

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, SessionError};
pub use settings::{Settings, Toggle};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 580.0;
    pub const CANVAS_HEIGHT: f32 = 520.0;

    /// Balls bounce this far from the canvas edges
    pub const WALL_MARGIN: f32 = 10.0;

    /// Paddle defaults - sits on the bottom edge of the canvas
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_START_X: f32 = 200.0;
    /// Distance moved per key press
    pub const PADDLE_STEP: f32 = 40.0;

    /// Brick grid layout
    pub const BRICK_COLUMNS: u32 = 6;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_X: f32 = 30.0;
    pub const BRICK_OFFSET_Y: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPAWN_X: f32 = 290.0;
    pub const BALL_SPAWN_Y: f32 = 290.0;
    /// Speed of the first ball on a level; each further ball is 1 px/tick faster
    pub const BALL_BASE_SPEED: f32 = 2.0;

    /// Chain bonus
    pub const BONUS_POINTS: u64 = 5;
    pub const BONUS_TEXT: &str = "+5 Bonus";
    pub const BONUS_DURATION_MS: f64 = 1000.0;

    /// Nominal tick period (the settings can override it)
    pub const TICK_INTERVAL_MS: u32 = 10;
}
