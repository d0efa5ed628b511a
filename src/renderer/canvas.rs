//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, css_color};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Device pixels per CSS pixel
    dpr: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let mut renderer = Self { canvas, ctx, dpr };
        renderer.fit_to_client();
        Ok(renderer)
    }

    /// Match the backing store to the element's CSS size. Returns the size
    /// in CSS pixels, which is the coordinate space of the scene.
    pub fn fit_to_client(&mut self) -> (f32, f32) {
        let w = self.canvas.client_width().max(1);
        let h = self.canvas.client_height().max(1);
        self.canvas.set_width((w as f64 * self.dpr) as u32);
        self.canvas.set_height((h as f64 * self.dpr) as u32);
        let _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        (w as f32, h as f32)
    }

    pub fn draw(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::Rect { min, max, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(
                        min.x as f64,
                        min.y as f64,
                        (max.x - min.x) as f64,
                        (max.y - min.y) as f64,
                    );
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.fill();
                }
                DrawCmd::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                DrawCmd::Text {
                    pos,
                    size,
                    text,
                    color,
                } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.set_font(&format!("bold {}px sans-serif", size.round()));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        Ok(())
    }
}
