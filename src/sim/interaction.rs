//! Tap/press resolution

use glam::Vec2;

use super::state::GameState;
use crate::audio::{AudioService, SoundCue};
use crate::consts::{ALERT_RADIUS, HIT_RADIUS};

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Prey caught: score bumped, prey respawned
    Caught,
    /// Close call: prey bolts away from the tap
    Alarmed,
    /// Too far away to matter
    Missed,
}

/// Resolve a tap (or auto-aimed key press) at `point`.
///
/// Always wakes the audio engine and leaves a ripple with a thump before
/// looking at the prey.
pub fn resolve_tap(state: &mut GameState, point: Vec2, audio: &mut impl AudioService) -> Outcome {
    audio.begin();

    state.ripples.spawn(point);
    audio.play(SoundCue::Thump);

    let dist = point.distance(state.prey.pos);
    if dist < HIT_RADIUS {
        state.score += 1;
        audio.play(SoundCue::Chirp);
        state.prey.respawn(state.viewport, &mut state.rng);
        log::info!(
            "Caught! score {} - next up: {:?}",
            state.score,
            state.prey.species
        );
        Outcome::Caught
    } else if dist < ALERT_RADIUS {
        state.prey.flee_from(point);
        audio.play(SoundCue::Scurry);
        log::debug!("Near miss at {:.0}px, prey fleeing", dist);
        Outcome::Alarmed
    } else {
        Outcome::Missed
    }
}
