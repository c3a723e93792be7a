//! Canvas 2D drawing (wasm only)

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{BACKGROUND, audio_hint, css_color, prey_alpha, score_text, species_colors};
use crate::Settings;
use crate::consts::PREY_SIZE;
use crate::sim::{HidingSpot, Prey, Ripple, Snapshot, Species, SpotKind};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Render the current frame
    pub fn draw(&self, snapshot: &Snapshot<'_>, settings: &Settings) {
        if let Err(e) = self.draw_frame(snapshot, settings) {
            log::warn!("Render error: {:?}", e);
        }
    }

    fn draw_frame(&self, snap: &Snapshot<'_>, settings: &Settings) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (snap.viewport.x as f64, snap.viewport.y as f64);

        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(&css_color(BACKGROUND, 1.0));
        ctx.fill_rect(0.0, 0.0, w, h);

        for spot in snap.spots {
            self.draw_spot(spot)?;
        }
        self.draw_prey(snap.prey)?;
        for ripple in snap.ripples {
            self.draw_ripple(ripple, settings.ripple_scale())?;
        }

        // HUD
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(&css_color(0x333333, 1.0));
        ctx.set_font("bold 24px sans-serif");
        ctx.set_text_align("left");
        ctx.fill_text(&score_text(snap), 20.0, 40.0)?;
        if let Some(hint) = audio_hint(snap) {
            ctx.set_font("18px sans-serif");
            ctx.set_text_align("center");
            ctx.fill_text(hint, w / 2.0, h - 30.0)?;
        }
        Ok(())
    }

    fn draw_spot(&self, spot: &HidingSpot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y, r) = (spot.center.x as f64, spot.center.y as f64, spot.radius as f64);
        ctx.set_fill_style_str(&css_color(spot.color, 0.85));

        match spot.kind {
            SpotKind::Rug => {
                ctx.begin_path();
                ctx.ellipse(x, y, r, r * 0.7, 0.0, 0.0, TAU)?;
                ctx.fill();
                ctx.set_stroke_style_str(&css_color(0xFFFFFF, 0.4));
                ctx.set_line_width(3.0);
                ctx.begin_path();
                ctx.ellipse(x, y, r * 0.8, r * 0.55, 0.0, 0.0, TAU)?;
                ctx.stroke();
            }
            SpotKind::Leaves => {
                // Ring of overlapping blobs, rotated per spot so piles differ
                for i in 0..6 {
                    let a = i as f64 * TAU / 6.0 + spot.id as f64;
                    ctx.begin_path();
                    ctx.arc(x + a.cos() * r * 0.45, y + a.sin() * r * 0.45, r * 0.55, 0.0, TAU)?;
                    ctx.fill();
                }
            }
        }
        Ok(())
    }

    fn draw_ripple(&self, ripple: &Ripple, scale: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_stroke_style_str(&css_color(0x555555, ripple.alpha));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.arc(
            ripple.center.x as f64,
            ripple.center.y as f64,
            (ripple.radius * scale) as f64,
            0.0,
            TAU,
        )?;
        ctx.stroke();
        Ok(())
    }

    fn draw_prey(&self, prey: &Prey) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let s = PREY_SIZE as f64;
        let (body, accent) = species_colors(prey.species);

        ctx.save();
        ctx.translate(prey.pos.x as f64, prey.pos.y as f64)?;
        ctx.rotate(prey.angle as f64)?;
        ctx.set_global_alpha(prey_alpha(prey.state) as f64);

        match prey.species {
            Species::Mouse => {
                // Tail
                ctx.set_stroke_style_str(&css_color(accent, 1.0));
                ctx.set_line_width(3.0);
                ctx.begin_path();
                ctx.move_to(-s * 0.55, 0.0);
                ctx.line_to(-s * 1.1, s * 0.15);
                ctx.stroke();
                // Body and head
                ctx.set_fill_style_str(&css_color(body, 1.0));
                ctx.begin_path();
                ctx.ellipse(0.0, 0.0, s * 0.6, s * 0.35, 0.0, 0.0, TAU)?;
                ctx.fill();
                ctx.begin_path();
                ctx.arc(s * 0.55, 0.0, s * 0.25, 0.0, TAU)?;
                ctx.fill();
                // Ears
                ctx.set_fill_style_str(&css_color(accent, 1.0));
                for side in [-1.0, 1.0] {
                    ctx.begin_path();
                    ctx.arc(s * 0.45, side * s * 0.22, s * 0.12, 0.0, TAU)?;
                    ctx.fill();
                }
            }
            Species::Bird => {
                ctx.set_fill_style_str(&css_color(body, 1.0));
                ctx.begin_path();
                ctx.arc(0.0, 0.0, s * 0.45, 0.0, TAU)?;
                ctx.fill();
                // Wing
                ctx.set_fill_style_str(&css_color(0x2C6FB0, 1.0));
                ctx.begin_path();
                ctx.ellipse(-s * 0.1, 0.0, s * 0.3, s * 0.15, 0.3, 0.0, TAU)?;
                ctx.fill();
                // Beak
                ctx.set_fill_style_str(&css_color(accent, 1.0));
                ctx.begin_path();
                ctx.move_to(s * 0.4, -s * 0.1);
                ctx.line_to(s * 0.75, 0.0);
                ctx.line_to(s * 0.4, s * 0.1);
                ctx.close_path();
                ctx.fill();
            }
        }

        // Eye
        ctx.set_fill_style_str(&css_color(0x111111, 1.0));
        ctx.begin_path();
        ctx.arc(s * 0.6, -s * 0.08, s * 0.05, 0.0, TAU)?;
        ctx.fill();

        ctx.restore();
        Ok(())
    }
}
