//! Canvas 2D rendering
//!
//! Draws a `Snapshot` each frame. Colors and HUD text are computed by the
//! helpers below so they can be tested off the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use crate::sim::{PreyState, Snapshot, Species};

/// Page background
pub const BACKGROUND: u32 = 0xF3EBDD;

/// Opacity of the prey; mostly covered while hiding
pub fn prey_alpha(state: PreyState) -> f32 {
    match state {
        PreyState::Idle | PreyState::Moving => 1.0,
        PreyState::Hiding => 0.35,
    }
}

/// (body, accent) colors
pub fn species_colors(species: Species) -> (u32, u32) {
    match species {
        Species::Mouse => (0x8D8D8D, 0xF4A6B7),
        Species::Bird => (0x4A90D9, 0xF5B942),
    }
}

/// `rgba(...)` string for canvas fill/stroke styles
pub fn css_color(rgb: u32, alpha: f32) -> String {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0))
}

/// Score line
pub fn score_text(snapshot: &Snapshot<'_>) -> String {
    format!("Caught: {}", snapshot.score)
}

/// Prompt shown until the first gesture unlocks audio
pub fn audio_hint(snapshot: &Snapshot<'_>) -> Option<&'static str> {
    (!snapshot.audio_started).then_some("Tap anywhere to turn on sound")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(0xFF8000, 0.5), "rgba(255, 128, 0, 0.500)");
        assert_eq!(css_color(0x000000, 2.0), "rgba(0, 0, 0, 1.000)");
    }

    #[test]
    fn test_hiding_prey_is_faded() {
        assert!(prey_alpha(PreyState::Hiding) < prey_alpha(PreyState::Idle));
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.score = 3;
        let snap = state.snapshot(false);
        assert_eq!(score_text(&snap), "Caught: 3");
        assert!(audio_hint(&snap).is_some());
        assert!(audio_hint(&state.snapshot(true)).is_none());
    }
}
