//! Game state and core simulation types
//!
//! Everything the engine mutates lives in [`GameState`]. A level is a fresh
//! set of bricks and balls; nothing from the previous level is reused.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::chain::BonusChain;
use super::collision::point_in_rect;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the Start button
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Every brick on the level is destroyed
    Won,
    /// The last ball fell past the paddle
    Lost,
}

impl GameStatus {
    /// Won and Lost end a playing session
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Brick colors - three shades of green
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickColor {
    Bright,
    Medium,
    Dark,
}

impl BrickColor {
    pub const PALETTE: [BrickColor; 3] = [BrickColor::Bright, BrickColor::Medium, BrickColor::Dark];

    /// Diagonal stripes: color index is (column + row) mod 3
    pub fn for_cell(row: u32, column: u32) -> Self {
        Self::PALETTE[((row + column) % Self::PALETTE.len() as u32) as usize]
    }

    /// CSS fill color
    pub fn hex(&self) -> &'static str {
        match self {
            BrickColor::Bright => "#00FF40",
            BrickColor::Medium => "#03C03C",
            BrickColor::Dark => "#00674b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Position one tick from now at the current velocity
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn reflect_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn reflect_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A brick entity. Bricks never move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Row-major index in the level grid; doubles as instance identity
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub color: BrickColor,
    pub status: BrickStatus,
}

impl Brick {
    pub const SIZE: Vec2 = Vec2::new(BRICK_WIDTH, BRICK_HEIGHT);

    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Whether `point` lies strictly inside the brick (edges excluded)
    pub fn contains(&self, point: Vec2) -> bool {
        point_in_rect(point, self.pos, Self::SIZE)
    }

    pub fn destroy(&mut self) {
        self.status = BrickStatus::Destroyed;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self { x: PADDLE_START_X }
    }
}

impl Paddle {
    pub const MAX_X: f32 = CANVAS_WIDTH - PADDLE_WIDTH;

    /// Top edge (the paddle rests on the bottom of the canvas)
    pub fn y(&self) -> f32 {
        CANVAS_HEIGHT - PADDLE_HEIGHT
    }

    /// Move horizontally, staying inside the canvas
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, Self::MAX_X);
    }

    /// Whether `x` is strictly between the paddle's edges
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + PADDLE_WIDTH
    }
}

/// Transient "+5 Bonus" text, shown until a deadline on the simulation clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusMessage {
    pub text: String,
    pub pos: Vec2,
    /// Simulation time (ms) at which the message hides; `None` when hidden
    pub expires_at_ms: Option<f64>,
}

impl Default for BonusMessage {
    fn default() -> Self {
        Self {
            text: String::new(),
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
            expires_at_ms: None,
        }
    }
}

impl BonusMessage {
    /// Show the bonus text centered on the field, restarting the display window
    pub fn show(&mut self, now_ms: f64) {
        self.text = BONUS_TEXT.to_string();
        self.pos = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        self.expires_at_ms = Some(now_ms + BONUS_DURATION_MS);
    }

    pub fn is_visible(&self, now_ms: f64) -> bool {
        self.expires_at_ms.is_some_and(|deadline| now_ms < deadline)
    }

    /// Drop the deadline once it has passed
    pub fn expire(&mut self, now_ms: f64) {
        if !self.is_visible(now_ms) {
            self.expires_at_ms = None;
        }
    }
}

/// Build the brick grid for a level: `level` rows of 6, row-major
pub fn initialize_bricks(level: u32) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity((level * BRICK_COLUMNS) as usize);
    for row in 0..level {
        for column in 0..BRICK_COLUMNS {
            bricks.push(Brick {
                id: row * BRICK_COLUMNS + column,
                pos: Vec2::new(
                    column as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_X,
                    row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_Y,
                ),
                color: BrickColor::for_cell(row, column),
                status: BrickStatus::Active,
            });
        }
    }
    bricks
}

/// Spawn `level` balls at the same point, each one faster than the last
pub fn initialize_balls(level: u32) -> Vec<Ball> {
    (0..level)
        .map(|i| {
            let speed = BALL_BASE_SPEED + i as f32;
            Ball::new(
                Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
                Vec2::new(speed, -speed),
            )
        })
        .collect()
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub status: GameStatus,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in milliseconds (sum of tick periods)
    pub time_ms: f64,
    pub paddle: Paddle,
    /// Active balls
    pub balls: Vec<Ball>,
    /// Level grid, row-major; destroyed bricks stay in place
    pub bricks: Vec<Brick>,
    pub chain: BonusChain,
    pub bonus: BonusMessage,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game at level 1, waiting to be started
    pub fn new() -> Self {
        let mut state = Self {
            level: 1,
            score: 0,
            status: GameStatus::NotStarted,
            time_ticks: 0,
            time_ms: 0.0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            chain: BonusChain::new(),
            bonus: BonusMessage::default(),
        };
        state.load_level(1);
        state
    }

    /// Replace all per-level state with a freshly built level.
    ///
    /// Score and status are left to the caller.
    pub fn load_level(&mut self, level: u32) {
        let level = level.max(1);
        self.level = level;
        self.bricks = initialize_bricks(level);
        self.balls = initialize_balls(level);
        self.paddle = Paddle::default();
        self.chain = BonusChain::new();
        self.bonus = BonusMessage::default();
        self.time_ticks = 0;
        self.time_ms = 0.0;
    }

    pub fn active_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    pub fn all_bricks_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }

    /// Destroy a brick by id; returns false if no such brick exists
    pub fn destroy_brick(&mut self, id: u32) -> bool {
        match self.bricks.iter_mut().find(|b| b.id == id) {
            Some(brick) => {
                brick.destroy();
                true
            }
            None => false,
        }
    }

    pub fn bonus_visible(&self) -> bool {
        self.bonus.is_visible(self.time_ms)
    }
}
