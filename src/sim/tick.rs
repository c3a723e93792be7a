//! Per-frame simulation tick
//!
//! One call per display frame. Ticks are the unit of time for the whole
//! simulation; there is no delta-time input.

use super::behavior::step_prey;
use super::state::GameState;
use crate::audio::AudioService;

/// Advance the game state by one tick: prey first, then ripples
pub fn tick(state: &mut GameState, audio: &mut impl AudioService) {
    state.time_ticks += 1;

    step_prey(
        &mut state.prey,
        &state.spots,
        state.viewport,
        &mut state.rng,
        audio,
    );

    state.ripples.step();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PreyState;
    use crate::sim::testing::RecordingAudio;
    use glam::Vec2;

    #[test]
    fn test_first_departure_after_sixty_ticks() {
        let mut state = GameState::new(12345, 800.0, 600.0);
        let mut audio = RecordingAudio::default();

        for _ in 0..59 {
            tick(&mut state, &mut audio);
        }
        assert_eq!(state.prey.state, PreyState::Idle);
        tick(&mut state, &mut audio);
        assert_eq!(state.prey.state, PreyState::Moving);
        assert_eq!(state.time_ticks, 60);
    }

    #[test]
    fn test_tick_steps_ripples() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.ripples.spawn(Vec2::new(5.0, 5.0));
        tick(&mut state, &mut RecordingAudio::default());
        assert_eq!(state.ripples.as_slice()[0].radius, 5.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(99999, 1280.0, 720.0);
        let mut b = GameState::new(99999, 1280.0, 720.0);
        let mut audio = RecordingAudio::default();
        for _ in 0..1000 {
            tick(&mut a, &mut audio);
            tick(&mut b, &mut audio);
        }
        assert_eq!(a.prey.pos, b.prey.pos);
        assert_eq!(a.prey.state, b.prey.state);
        assert_eq!(a.prey.timer, b.prey.timer);
    }

    #[test]
    fn test_long_run_stays_in_known_states() {
        let mut state = GameState::new(2024, 1024.0, 768.0);
        let mut audio = RecordingAudio::default();
        let mut seen_hiding = false;
        for _ in 0..20_000 {
            let before = state.prey.timer;
            let was = state.prey.state;
            tick(&mut state, &mut audio);
            // Every transition changes state, so staying put means counting down
            if state.prey.state == was {
                assert_eq!(state.prey.timer, before - 1);
            } else {
                assert!(state.prey.timer > 0);
            }
            seen_hiding |= state.prey.state == PreyState::Hiding;
            assert!(state.prey.pos.is_finite());
        }
        assert!(seen_hiding, "prey never found a hiding spot");
    }
}
