//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::chain::ChainOutcome;
use super::collision::{BoundaryResult, resolve_boundaries};
use super::state::{GameState, GameStatus};
use crate::consts::*;

/// Discrete paddle input (one per key press)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleMove {
    Left,
    Right,
}

impl PaddleMove {
    /// Signed horizontal displacement for this move
    pub fn delta(&self) -> f32 {
        match self {
            PaddleMove::Left => -PADDLE_STEP,
            PaddleMove::Right => PADDLE_STEP,
        }
    }
}

/// Apply one paddle input. Ignored unless the game is being played.
pub fn apply_move(state: &mut GameState, input: PaddleMove) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.paddle.shift(input.delta());
}

/// Advance the game state by one tick of `dt_ms` milliseconds.
///
/// Order matters: brick collisions first, then the win check, then wall and
/// paddle resolution with movement. Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, dt_ms: f64) {
    if state.status != GameStatus::Playing {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += dt_ms;
    state.bonus.expire(state.time_ms);

    resolve_brick_hits(state);

    if state.all_bricks_destroyed() {
        state.status = GameStatus::Won;
        log::info!("Level {} cleared (score {})", state.level, state.score);
    }

    advance_balls(state);
}

/// Test every ball against every brick that is active when its turn comes.
///
/// A brick destroyed partway through its ball loop still reflects and chains
/// the remaining balls overlapping it this tick.
fn resolve_brick_hits(state: &mut GameState) {
    for brick_idx in 0..state.bricks.len() {
        let brick = state.bricks[brick_idx];
        if !brick.is_active() {
            continue;
        }

        for ball_idx in 0..state.balls.len() {
            if !brick.contains(state.balls[ball_idx].pos) {
                continue;
            }

            // Reflect on every overlap, even if this ball already bounced this tick
            state.balls[ball_idx].reflect_y();

            match state.chain.register_hit(brick.id, brick.color) {
                ChainOutcome::Completed { first, second } => {
                    state.destroy_brick(first);
                    state.destroy_brick(second);
                    state.score += BONUS_POINTS;
                    state.bonus.show(state.time_ms);
                    log::debug!(
                        "Chain bonus: bricks {} + {} ({:?}), score {}, {} bricks left",
                        first,
                        second,
                        brick.color,
                        state.score,
                        state.active_bricks()
                    );
                }
                ChainOutcome::Started { brick } => {
                    log::trace!("Chain started on brick {}", brick);
                }
                ChainOutcome::Replaced { previous, brick } => {
                    log::trace!("Chain moved from brick {} to {}", previous, brick);
                }
            }
        }
    }
}

/// Bounce and move every ball, dropping the ones that missed the paddle
fn advance_balls(state: &mut GameState) {
    let paddle = state.paddle;
    let before = state.balls.len();

    state.balls.retain_mut(|ball| match resolve_boundaries(ball, &paddle) {
        BoundaryResult::InPlay => {
            ball.advance();
            true
        }
        BoundaryResult::Missed => false,
    });

    let missed = before - state.balls.len();
    if missed > 0 {
        log::debug!("{} ball(s) lost, {} left", missed, state.balls.len());
    }

    // A level cleared this same tick stays won
    if missed > 0 && state.balls.is_empty() && state.status == GameStatus::Playing {
        state.status = GameStatus::Lost;
        log::info!("Game over on level {} (score {})", state.level, state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, BrickColor};
    use crate::sim::view::Frame;
    use glam::Vec2;

    const DT: f64 = TICK_INTERVAL_MS as f64;

    fn playing_state(level: u32) -> GameState {
        let mut state = GameState::new();
        state.load_level(level);
        state.status = GameStatus::Playing;
        state
    }

    /// Park a single slow ball in the middle of a brick
    fn ball_inside(state: &GameState, brick_id: u32) -> Ball {
        let brick = state.bricks[brick_id as usize];
        Ball::new(brick.pos + Vec2::new(37.0, 10.0), Vec2::new(0.0, 1.0))
    }

    #[test]
    fn test_tick_not_playing_is_noop() {
        for status in [GameStatus::NotStarted, GameStatus::Won, GameStatus::Lost] {
            let mut state = GameState::new();
            state.status = status;
            let balls = state.balls.clone();
            tick(&mut state, DT);
            assert_eq!(state.balls, balls);
            assert_eq!(state.time_ticks, 0);
            assert_eq!(state.status, status);
        }
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut state = playing_state(1);
        tick(&mut state, DT);
        assert_eq!(state.balls[0].pos, Vec2::new(292.0, 288.0));
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.time_ms, DT);
    }

    #[test]
    fn test_first_hit_marks_pending_without_destroying() {
        let mut state = playing_state(1);
        state.balls = vec![ball_inside(&state, 0)];

        tick(&mut state, DT);

        assert_eq!(state.chain.pending(), Some(0));
        assert!(state.bricks[0].is_active());
        assert_eq!(state.score, 0);
        // Reflected, then moved
        assert_eq!(state.balls[0].vel, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_matching_second_hit_destroys_both() {
        let mut state = playing_state(1);
        // Bricks 0 and 3 share a color in row 0
        assert_eq!(state.bricks[0].color, state.bricks[3].color);

        state.balls = vec![ball_inside(&state, 0)];
        tick(&mut state, DT);
        state.balls = vec![ball_inside(&state, 3)];
        tick(&mut state, DT);

        assert!(!state.bricks[0].is_active());
        assert!(!state.bricks[3].is_active());
        assert_eq!(state.score, BONUS_POINTS);
        assert_eq!(state.chain.pending(), None);
        assert!(state.bonus_visible());
        assert_eq!(state.bonus.text, "+5 Bonus");
    }

    #[test]
    fn test_mismatched_hit_breaks_chain() {
        let mut state = playing_state(1);
        assert_ne!(state.bricks[0].color, state.bricks[1].color);

        state.balls = vec![ball_inside(&state, 0)];
        tick(&mut state, DT);
        state.balls = vec![ball_inside(&state, 1)];
        tick(&mut state, DT);

        assert_eq!(state.chain.pending(), Some(1));
        assert!(state.bricks[0].is_active());
        assert!(state.bricks[1].is_active());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_two_balls_in_one_brick_both_reflect() {
        let mut state = playing_state(1);
        let ball = ball_inside(&state, 2);
        state.balls = vec![ball, ball];

        tick(&mut state, DT);

        // Same instance twice: pending stays on brick 2, nothing destroyed
        assert_eq!(state.chain.pending(), Some(2));
        assert!(state.bricks[2].is_active());
        assert!(state.balls.iter().all(|b| b.vel == Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn test_two_balls_chain_in_one_tick() {
        let mut state = playing_state(1);
        state.balls = vec![ball_inside(&state, 1), ball_inside(&state, 4)];
        assert_eq!(state.bricks[1].color, BrickColor::Medium);
        assert_eq!(state.bricks[4].color, BrickColor::Medium);

        tick(&mut state, DT);

        assert!(!state.bricks[1].is_active());
        assert!(!state.bricks[4].is_active());
        assert_eq!(state.score, BONUS_POINTS);
    }

    #[test]
    fn test_bonus_message_hides_after_one_second() {
        let mut state = playing_state(2);
        state.balls = vec![ball_inside(&state, 0)];
        tick(&mut state, DT);
        state.balls = vec![ball_inside(&state, 3)];
        tick(&mut state, DT);
        assert!(state.bonus_visible());

        // Keep a harmless ball bouncing in open space
        state.balls = vec![Ball::new(Vec2::new(290.0, 300.0), Vec2::new(0.0, 0.0))];
        for _ in 0..99 {
            tick(&mut state, DT);
        }
        assert!(state.bonus_visible());
        tick(&mut state, DT);
        assert!(!state.bonus_visible());
        assert_eq!(state.bonus.expires_at_ms, None);
    }

    #[test]
    fn test_clearing_last_bricks_wins() {
        let mut state = playing_state(1);
        for id in [1, 2, 4, 5] {
            state.destroy_brick(id);
        }
        state.balls = vec![ball_inside(&state, 0)];
        tick(&mut state, DT);
        assert_eq!(state.status, GameStatus::Playing);

        state.balls = vec![ball_inside(&state, 3)];
        tick(&mut state, DT);
        assert_eq!(state.status, GameStatus::Won);
        assert!(state.all_bricks_destroyed());
    }

    #[test]
    fn test_win_survives_losing_last_ball_same_tick() {
        let mut state = playing_state(1);
        for id in [1, 2, 4, 5] {
            state.destroy_brick(id);
        }
        state.balls = vec![ball_inside(&state, 0)];
        tick(&mut state, DT);
        assert_eq!(state.chain.pending(), Some(0));

        // Reflected to (0, 500): the ball clears the floor beside a parked paddle
        state.paddle.x = 0.0;
        let mut ball = ball_inside(&state, 3);
        ball.vel = Vec2::new(0.0, -500.0);
        state.balls = vec![ball];
        tick(&mut state, DT);

        assert!(state.all_bricks_destroyed());
        assert!(state.balls.is_empty());
        assert_eq!(state.status, GameStatus::Won);
    }

    #[test]
    fn test_bonus_shown_at_canvas_center() {
        let mut state = playing_state(1);
        state.balls = vec![ball_inside(&state, 0)];
        tick(&mut state, DT);
        state.balls = vec![ball_inside(&state, 3)];
        tick(&mut state, DT);

        let bonus = Frame::capture(&state).bonus;
        assert!(bonus.visible);
        assert_eq!(bonus.text, "+5 Bonus");
        assert_eq!((bonus.x, bonus.y), (290.0, 260.0));
    }

    #[test]
    fn test_losing_last_ball_loses() {
        let mut state = playing_state(1);
        state.paddle.x = 0.0;
        state.balls = vec![Ball::new(Vec2::new(400.0, 509.0), Vec2::new(2.0, 2.0))];

        tick(&mut state, DT);

        assert!(state.balls.is_empty());
        assert_eq!(state.status, GameStatus::Lost);
    }

    #[test]
    fn test_losing_one_of_two_balls_keeps_playing() {
        let mut state = playing_state(2);
        state.paddle.x = 0.0;
        state.balls = vec![
            Ball::new(Vec2::new(400.0, 509.0), Vec2::new(2.0, 2.0)),
            Ball::new(Vec2::new(75.0, 509.0), Vec2::new(2.0, 2.0)),
        ];

        tick(&mut state, DT);

        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].vel, Vec2::new(2.0, -2.0));
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_move_only_while_playing() {
        let mut state = GameState::new();
        apply_move(&mut state, PaddleMove::Left);
        assert_eq!(state.paddle.x, PADDLE_START_X);

        state.status = GameStatus::Playing;
        apply_move(&mut state, PaddleMove::Left);
        assert_eq!(state.paddle.x, PADDLE_START_X - PADDLE_STEP);
        apply_move(&mut state, PaddleMove::Right);
        apply_move(&mut state, PaddleMove::Right);
        assert_eq!(state.paddle.x, PADDLE_START_X + PADDLE_STEP);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state(3);
        let mut state2 = playing_state(3);
        let moves = [PaddleMove::Left, PaddleMove::Right, PaddleMove::Right];

        for i in 0..2000 {
            if i % 50 == 0 {
                let input = moves[(i / 50) % moves.len()];
                apply_move(&mut state1, input);
                apply_move(&mut state2, input);
            }
            tick(&mut state1, DT);
            tick(&mut state2, DT);
        }

        assert_eq!(state1.balls, state2.balls);
        assert_eq!(state1.bricks, state2.bricks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.status, state2.status);
    }
}
