//! Canvas 2D drawing (WASM only)
//!
//! Frame order: pre-rendered background, clouds, trees, pipes, coins,
//! player. The sky/ground backdrop with its noise texture is expensive
//! to produce, so it is rendered once per resize onto an offscreen
//! canvas and blitted every frame.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::renderer::sprites::{self, SpriteRect};
use crate::sim::{CloudTint, SessionState};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    backdrop: HtmlCanvasElement,
    width: f64,
    height: f64,
}

fn context_of(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_image_smoothing_enabled(false);
    Ok(ctx)
}

fn fill_sprite(ctx: &CanvasRenderingContext2d, pixels: &[SpriteRect]) {
    for rect in pixels {
        ctx.set_fill_style_str(rect.color);
        ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }
}

/// Draw the player sprite at `(x, y)` with the given tilt. Also used
/// by the game-over panel to show the player upright.
pub fn draw_player(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    rotation_deg: f64,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(x, y)?;
    ctx.rotate(rotation_deg.to_radians())?;
    let scale = PLAYER_WIDTH as f64 / sprites::PLAYER_BASE_SIZE;
    ctx.scale(scale, scale)?;
    ctx.translate(
        -sprites::PLAYER_BASE_SIZE / 2.0,
        -sprites::PLAYER_BASE_SIZE / 2.0,
    )?;
    fill_sprite(ctx, sprites::PLAYER_PIXELS);
    ctx.restore();
    Ok(())
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_of(canvas)?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let backdrop = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        let mut renderer = Self {
            ctx,
            backdrop,
            width: 0.0,
            height: 0.0,
        };
        renderer.resize(canvas.width() as f64, canvas.height() as f64)?;
        Ok(renderer)
    }

    /// Adopt new surface dimensions and re-render the backdrop
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.width = width;
        self.height = height;
        self.backdrop.set_width(width as u32);
        self.backdrop.set_height(height as u32);
        let ctx = context_of(&self.backdrop)?;

        // Sky
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        gradient.add_color_stop(0.0, sprites::SKY_TOP)?;
        gradient.add_color_stop(1.0, sprites::SKY_BOTTOM)?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, width, height);

        // Faint sky speckle; purely cosmetic, so plain Math.random is
        // fine here
        for _ in 0..500 {
            let x = (js_sys::Math::random() * width).floor();
            let y = (js_sys::Math::random() * height * 0.8).floor();
            let alpha = js_sys::Math::random() * 0.05;
            ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {alpha})"));
            ctx.fill_rect(x, y, 2.0, 2.0);
        }

        // Ground strip with dark noise and a grass lip
        let ground_y = height - GROUND_HEIGHT as f64;
        ctx.set_fill_style_str(sprites::GROUND);
        ctx.fill_rect(0.0, ground_y, width, GROUND_HEIGHT as f64);
        let mut i = 0.0;
        while i < width {
            let mut j = ground_y;
            while j < height {
                let alpha = js_sys::Math::random() * 0.1;
                ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {alpha})"));
                ctx.fill_rect(i, j, 4.0, 4.0);
                j += 4.0;
            }
            i += 4.0;
        }
        ctx.set_fill_style_str(sprites::GROUND_LIP);
        ctx.fill_rect(0.0, ground_y, width, 5.0);
        Ok(())
    }

    /// Draw one frame of the session
    pub fn render(&self, state: &SessionState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        ctx.draw_image_with_html_canvas_element(&self.backdrop, 0.0, 0.0)?;

        for cloud in &state.clouds {
            let tint = match cloud.tint {
                CloudTint::White => "rgba(255, 255, 255, 0.9)",
                CloudTint::Dark => "rgba(0, 0, 0, 0.1)",
            };
            ctx.set_fill_style_str(tint);
            for (x, y, w, h) in
                sprites::cloud_rects(cloud.pos.x as f64, cloud.pos.y as f64, cloud.size as f64)
            {
                ctx.fill_rect(x, y, w, h);
            }
        }

        for tree in &state.trees {
            let rects =
                sprites::tree_rects(tree.x as f64, tree.size as f64, tree.variant, self.height);
            fill_sprite(ctx, &rects);
        }

        let gap = state.gap_height() as f64;
        for pipe in &state.pipes {
            self.draw_pipe_pair(pipe.x as f64, pipe.top_height as f64, gap);
        }

        for coin in &state.coins {
            self.draw_coin(coin.pos.x as f64, coin.pos.y as f64)?;
        }

        draw_player(
            ctx,
            state.player.pos.x as f64,
            state.player.pos.y as f64,
            state.player.rotation_deg as f64,
        )
    }

    fn draw_coin(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(x, y)?;
        let scale = COIN_SIZE as f64 / sprites::COIN_BASE_SIZE;
        ctx.scale(scale, scale)?;
        ctx.translate(-sprites::COIN_BASE_SIZE / 2.0, -sprites::COIN_BASE_SIZE / 2.0)?;
        fill_sprite(ctx, sprites::COIN_PIXELS);
        ctx.restore();
        Ok(())
    }

    /// A pipe pair: top segment hanging from the ceiling, bottom
    /// segment standing to the floor, each capped with an overhanging
    /// head around the gap
    fn draw_pipe_pair(&self, x: f64, top_height: f64, gap: f64) {
        let ctx = &self.ctx;
        let w = PIPE_WIDTH as f64;
        let head = PIPE_HEAD_HEIGHT as f64;
        let overhang = PIPE_HEAD_OVERHANG as f64;

        // Top segment
        let top_body = top_height - head;
        ctx.set_fill_style_str(sprites::PIPE_MAIN);
        ctx.fill_rect(x, 0.0, w, top_body);
        ctx.set_fill_style_str(sprites::PIPE_HIGHLIGHT);
        ctx.fill_rect(x + 8.0, 0.0, 16.0, top_body);
        ctx.set_fill_style_str(sprites::PIPE_MAIN);
        ctx.fill_rect(x - overhang, top_body, w + overhang * 2.0, head);
        ctx.set_fill_style_str(sprites::PIPE_HIGHLIGHT);
        ctx.fill_rect(x, top_body, 16.0, head);
        ctx.set_fill_style_str(sprites::PIPE_SHADOW);
        ctx.fill_rect(x - overhang, top_body + head - 8.0, w + overhang * 2.0, 8.0);
        ctx.set_fill_style_str(sprites::PIPE_DARK);
        ctx.fill_rect(x, top_body + 8.0, w, 16.0);
        ctx.set_fill_style_str(sprites::PIPE_BLACK);
        ctx.fill_rect(x + 8.0, top_body + 8.0, w - 16.0, 8.0);

        // Bottom segment
        let bottom_y = top_height + gap;
        let bottom_body = self.height - bottom_y - head;
        ctx.set_fill_style_str(sprites::PIPE_MAIN);
        ctx.fill_rect(x - overhang, bottom_y, w + overhang * 2.0, head);
        ctx.set_fill_style_str(sprites::PIPE_HIGHLIGHT);
        ctx.fill_rect(x, bottom_y, 16.0, head);
        ctx.set_fill_style_str(sprites::PIPE_SHADOW);
        ctx.fill_rect(x - overhang, bottom_y + 8.0, w + overhang * 2.0, 8.0);
        ctx.set_fill_style_str(sprites::PIPE_DARK);
        ctx.fill_rect(x, bottom_y, w, 16.0);
        ctx.set_fill_style_str(sprites::PIPE_BLACK);
        ctx.fill_rect(x + 8.0, bottom_y + 8.0, w - 16.0, 8.0);
        ctx.set_fill_style_str(sprites::PIPE_MAIN);
        ctx.fill_rect(x, bottom_y + head, w, bottom_body);
        ctx.set_fill_style_str(sprites::PIPE_HIGHLIGHT);
        ctx.fill_rect(x + 8.0, bottom_y + head, 16.0, bottom_body);
    }
}
