//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{
    BACKGROUND, BALL_FILL, BONUS_FILL, BONUS_FONT, HUD_FONT, PADDLE_FILL, brick_fill,
};
use crate::sim::Frame;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas to the frame and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Result<Self, JsValue> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { ctx })
    }

    pub fn render(&self, frame: &Frame, high_contrast: bool, fps: Option<u32>) {
        let ctx = &self.ctx;
        let w = f64::from(frame.width);
        let h = f64::from(frame.height);

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        for brick in frame.bricks.iter().filter(|b| b.active) {
            ctx.set_fill_style_str(brick_fill(brick, high_contrast));
            ctx.fill_rect(
                f64::from(brick.x),
                f64::from(brick.y),
                f64::from(brick.width),
                f64::from(brick.height),
            );
        }

        let paddle = &frame.paddle;
        ctx.set_fill_style_str(PADDLE_FILL);
        ctx.fill_rect(
            f64::from(paddle.x),
            f64::from(paddle.y),
            f64::from(paddle.width),
            f64::from(paddle.height),
        );

        ctx.set_fill_style_str(BALL_FILL);
        for ball in &frame.balls {
            ctx.begin_path();
            let _ = ctx.arc(
                f64::from(ball.x),
                f64::from(ball.y),
                f64::from(ball.radius),
                0.0,
                TAU,
            );
            ctx.fill();
        }

        if frame.bonus.visible {
            ctx.set_font(BONUS_FONT);
            ctx.set_fill_style_str(BONUS_FILL);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let _ = ctx.fill_text(
                &frame.bonus.text,
                f64::from(frame.bonus.x),
                f64::from(frame.bonus.y),
            );
        }

        if let Some(fps) = fps {
            ctx.set_font(HUD_FONT);
            ctx.set_fill_style_str(PADDLE_FILL);
            ctx.set_text_align("right");
            ctx.set_text_baseline("top");
            let _ = ctx.fill_text(&format!("{} fps", fps), w - 4.0, 4.0);
        }
    }
}
