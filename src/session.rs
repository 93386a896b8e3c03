//! Session control surface
//!
//! A `Session` owns the one `GameState` and is what the presentation layer
//! talks to: buttons call `start`/`reset`/`advance_level`, key presses call
//! `move_paddle`, and the tick timer calls `tick`.
//!
//! Every reinitialization bumps the session epoch. Timers are scheduled with
//! the epoch current at scheduling time, and a tick carrying an older epoch is
//! dropped, so a callback left over from a previous level can never touch the
//! new one.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{Frame, GameState, GameStatus, PaddleMove, apply_move, tick};

/// Session control called in the wrong state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game already started (status {0:?})")]
    AlreadyStarted(GameStatus),
    #[error("level {level} is not complete (status {status:?})")]
    LevelNotComplete { level: u32, status: GameStatus },
}

/// One player's game, from the start screen through any number of levels
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    epoch: u64,
    tick_ms: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: GameState::new(),
            epoch: 0,
            tick_ms: settings.tick_ms(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Generation of the current playing session
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    /// Leave the start screen and begin level 1
    pub fn start(&mut self) -> Result<u64, SessionError> {
        if self.state.status != GameStatus::NotStarted {
            log::warn!("start() ignored in {:?}", self.state.status);
            return Err(SessionError::AlreadyStarted(self.state.status));
        }
        self.state.status = GameStatus::Playing;
        self.epoch += 1;
        log::info!("Game started (epoch {})", self.epoch);
        Ok(self.epoch)
    }

    /// Back to level 1 with a zero score, playing immediately
    pub fn reset(&mut self) -> u64 {
        self.state.score = 0;
        self.state.load_level(1);
        self.state.status = GameStatus::Playing;
        self.epoch += 1;
        log::info!("Game reset (epoch {})", self.epoch);
        self.epoch
    }

    /// Move on from a cleared level; only valid once the level is won
    pub fn advance_level(&mut self) -> Result<u64, SessionError> {
        if self.state.status != GameStatus::Won {
            log::warn!("advance_level() ignored in {:?}", self.state.status);
            return Err(SessionError::LevelNotComplete {
                level: self.state.level,
                status: self.state.status,
            });
        }
        let next = self.state.level + 1;
        self.state.load_level(next);
        self.state.status = GameStatus::Playing;
        self.epoch += 1;
        log::info!(
            "Level {} begins: {} bricks, {} balls (epoch {})",
            next,
            self.state.bricks.len(),
            self.state.balls.len(),
            self.epoch
        );
        Ok(self.epoch)
    }

    pub fn move_paddle(&mut self, input: PaddleMove) {
        apply_move(&mut self.state, input);
    }

    /// Run one tick scheduled under `epoch`, assuming exactly one tick period
    /// has passed.
    ///
    /// Returns whether the simulation actually advanced.
    pub fn tick(&mut self, epoch: u64) -> bool {
        self.tick_elapsed(epoch, self.tick_ms)
    }

    /// Run one tick scheduled under `epoch` after `elapsed_ms` of wall-clock
    /// time. Balls move one step per tick; the bonus deadline follows the
    /// real elapsed time, so a throttled timer cannot stretch it.
    pub fn tick_elapsed(&mut self, epoch: u64, elapsed_ms: f64) -> bool {
        if epoch != self.epoch {
            log::debug!("Dropping stale tick (epoch {} != {})", epoch, self.epoch);
            return false;
        }
        if self.state.status != GameStatus::Playing {
            return false;
        }
        let dt_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        tick(&mut self.state, dt_ms);
        true
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state)
    }

    /// The current frame as JSON for non-Rust presenters
    pub fn frame_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.frame())
    }
}
