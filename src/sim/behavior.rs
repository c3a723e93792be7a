//! Prey state machine and physics
//!
//! Everything is measured in ticks: one tick moves the prey by exactly one
//! velocity unit, with no elapsed-time scaling. A host that ticks at a
//! different rate than the display it was tuned on changes the apparent speed.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::spots::{HidingSpot, spot_at};
use super::state::{Prey, PreyState, random_inset_point};
use crate::audio::AudioService;
use crate::consts::*;
use crate::{angle_between, heading};

/// Advance the prey by one tick: count down, then act on the current state
pub fn step_prey(
    prey: &mut Prey,
    spots: &[HidingSpot],
    viewport: Vec2,
    rng: &mut impl Rng,
    audio: &mut impl AudioService,
) {
    prey.timer -= 1;

    match prey.state {
        PreyState::Idle => {
            prey.vel *= FRICTION;
            if prey.timer <= 0 {
                depart(prey, spots, viewport, rng, audio);
            }
        }
        PreyState::Moving => {
            integrate(prey, viewport);
            if prey.timer <= 0 {
                settle(prey, spots, rng);
            }
        }
        PreyState::Hiding => {
            prey.vel *= FRICTION;
            if prey.timer <= 0 {
                prey.state = PreyState::Idle;
                prey.timer = REST_AFTER_HIDING_TICKS;
                log::debug!("Prey left its hiding spot");
            }
        }
    }
}

/// Idle -> Moving: choose a destination and launch toward it
fn depart(
    prey: &mut Prey,
    spots: &[HidingSpot],
    viewport: Vec2,
    rng: &mut impl Rng,
    audio: &mut impl AudioService,
) {
    let target = pick_target(spots, viewport, rng);
    let theta = angle_between(prey.pos, target);
    let speed = BASE_SPEED * rng.random_range(0.8..1.2);

    prey.state = PreyState::Moving;
    prey.timer = rng.random_range(MOVE_TICKS.0..MOVE_TICKS.1);
    prey.target = Some(target);
    prey.vel = heading(theta) * speed;
    prey.angle = theta;
    log::debug!(
        "Prey moving toward ({:.0}, {:.0}) for {} ticks",
        target.x,
        target.y,
        prey.timer
    );

    if rng.random_bool(DEPART_CUE_CHANCE) {
        audio.play(prey.species.cue());
    }
}

/// Moving -> Hiding if it stopped inside a spot, otherwise Moving -> Idle
fn settle(prey: &mut Prey, spots: &[HidingSpot], rng: &mut impl Rng) {
    match spot_at(spots, prey.pos) {
        Some(spot) => {
            prey.state = PreyState::Hiding;
            prey.timer = HIDE_TICKS;
            log::debug!("Prey hiding in spot {}", spot.id);
        }
        None => {
            prey.state = PreyState::Idle;
            prey.timer = rng.random_range(IDLE_TICKS.0..IDLE_TICKS.1);
        }
    }
}

/// A hiding spot most of the time, otherwise anywhere away from the edges
fn pick_target(spots: &[HidingSpot], viewport: Vec2, rng: &mut impl Rng) -> Vec2 {
    if !spots.is_empty() && rng.random_bool(SEEK_SPOT_CHANCE) {
        if let Some(spot) = spots.choose(rng) {
            return spot.center;
        }
    }
    random_inset_point(viewport, WANDER_MARGIN, rng)
}

/// Euler step plus edge bounce. Positions are never clamped; a velocity
/// component flips once when the prey crosses out through that edge.
pub fn integrate(prey: &mut Prey, viewport: Vec2) {
    prey.pos += prey.vel;

    if (prey.pos.x < 0.0 && prey.vel.x < 0.0) || (prey.pos.x > viewport.x && prey.vel.x > 0.0) {
        prey.vel.x = -prey.vel.x;
    }
    if (prey.pos.y < 0.0 && prey.vel.y < 0.0) || (prey.pos.y > viewport.y && prey.vel.y > 0.0) {
        prey.vel.y = -prey.vel.y;
    }

    if prey.vel != Vec2::ZERO {
        prey.angle = prey.vel.y.atan2(prey.vel.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundCue;
    use crate::sim::spots::SpotKind;
    use crate::sim::state::Species;
    use crate::sim::testing::RecordingAudio;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    fn spot(center: Vec2, radius: f32) -> HidingSpot {
        HidingSpot {
            id: 0,
            center,
            radius,
            kind: SpotKind::Leaves,
            color: 0,
        }
    }

    fn prey_in(state: PreyState, timer: i32) -> Prey {
        let mut prey = Prey::new(Vec2::new(400.0, 300.0), Species::Mouse);
        prey.state = state;
        prey.timer = timer;
        prey
    }

    #[test]
    fn test_idle_expiry_starts_moving() {
        let spots = [spot(Vec2::new(100.0, 100.0), 60.0)];
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut audio = RecordingAudio::default();
            let mut prey = prey_in(PreyState::Idle, 1);

            step_prey(&mut prey, &spots, VIEW, &mut rng, &mut audio);

            assert_eq!(prey.state, PreyState::Moving);
            assert!((MOVE_TICKS.0..MOVE_TICKS.1).contains(&prey.timer));
            let speed = prey.vel.length();
            assert!(speed >= BASE_SPEED * 0.8 - 1e-4 && speed < BASE_SPEED * 1.2 + 1e-4);
            let target = prey.target.expect("departing prey has a target");
            let dir = (target - prey.pos).normalize();
            assert!(dir.dot(prey.vel.normalize()) > 0.999);
            assert!((prey.angle - prey.vel.y.atan2(prey.vel.x)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_departure_targets_spots_and_open_ground() {
        let spots = [spot(Vec2::new(100.0, 100.0), 60.0)];
        let mut to_spot = 0;
        for seed in 0..500 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut prey = prey_in(PreyState::Idle, 1);
            step_prey(&mut prey, &spots, VIEW, &mut rng, &mut RecordingAudio::default());
            let target = prey.target.unwrap();
            if target == spots[0].center {
                to_spot += 1;
            } else {
                assert!(target.x >= WANDER_MARGIN && target.x <= VIEW.x - WANDER_MARGIN);
                assert!(target.y >= WANDER_MARGIN && target.y <= VIEW.y - WANDER_MARGIN);
            }
        }
        // ~60% of 500
        assert!((240..360).contains(&to_spot), "{to_spot} departures to a spot");
    }

    #[test]
    fn test_no_spots_always_wanders() {
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut prey = prey_in(PreyState::Idle, 1);
            step_prey(&mut prey, &[], VIEW, &mut rng, &mut RecordingAudio::default());
            let target = prey.target.unwrap();
            assert!(target.x >= WANDER_MARGIN && target.x <= VIEW.x - WANDER_MARGIN);
        }
    }

    #[test]
    fn test_departure_cue_matches_species() {
        let mut cues = Vec::new();
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut audio = RecordingAudio::default();
            let mut prey = prey_in(PreyState::Idle, 1);
            prey.species = Species::Bird;
            step_prey(&mut prey, &[], VIEW, &mut rng, &mut audio);
            cues.extend(audio.cues);
        }
        assert!(cues.iter().all(|c| *c == SoundCue::Chirp));
        // ~70% of departures make a sound
        assert!((50..90).contains(&cues.len()), "{} cues", cues.len());
    }

    #[test]
    fn test_moving_expiry_inside_spot_hides() {
        let spots = [spot(Vec2::new(400.0, 300.0), 60.0)];
        let mut rng = Pcg32::seed_from_u64(5);
        let mut prey = prey_in(PreyState::Moving, 1);
        prey.vel = Vec2::new(1.0, 0.0);

        step_prey(&mut prey, &spots, VIEW, &mut rng, &mut RecordingAudio::default());

        assert_eq!(prey.state, PreyState::Hiding);
        assert_eq!(prey.timer, HIDE_TICKS);
    }

    #[test]
    fn test_moving_expiry_in_the_open_idles() {
        let spots = [spot(Vec2::new(100.0, 100.0), 60.0)];
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut prey = prey_in(PreyState::Moving, 1);
            prey.vel = Vec2::new(2.0, 0.0);
            step_prey(&mut prey, &spots, VIEW, &mut rng, &mut RecordingAudio::default());
            assert_eq!(prey.state, PreyState::Idle);
            assert!((IDLE_TICKS.0..IDLE_TICKS.1).contains(&prey.timer));
            assert_eq!(prey.pos, Vec2::new(402.0, 300.0));
        }
    }

    #[test]
    fn test_hiding_expiry_rests() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut prey = prey_in(PreyState::Hiding, 1);
        prey.vel = Vec2::new(1.0, 1.0);
        step_prey(&mut prey, &[], VIEW, &mut rng, &mut RecordingAudio::default());
        assert_eq!(prey.state, PreyState::Idle);
        assert_eq!(prey.timer, REST_AFTER_HIDING_TICKS);
        assert!((prey.vel.x - FRICTION).abs() < 1e-6);
    }

    #[test]
    fn test_idle_applies_friction_without_moving() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut prey = prey_in(PreyState::Idle, 50);
        prey.vel = Vec2::new(10.0, 0.0);
        step_prey(&mut prey, &[], VIEW, &mut rng, &mut RecordingAudio::default());
        assert!((prey.vel.x - 9.2).abs() < 1e-5);
        assert_eq!(prey.pos, Vec2::new(400.0, 300.0));
        assert_eq!(prey.timer, 49);
    }

    #[test]
    fn test_timer_counts_down_until_transition() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut audio = RecordingAudio::default();
        let mut prey = prey_in(PreyState::Hiding, HIDE_TICKS);
        for expected in (1..HIDE_TICKS).rev() {
            step_prey(&mut prey, &[], VIEW, &mut rng, &mut audio);
            assert_eq!(prey.timer, expected);
            assert_eq!(prey.state, PreyState::Hiding);
        }
        step_prey(&mut prey, &[], VIEW, &mut rng, &mut audio);
        assert_eq!(prey.state, PreyState::Idle);
    }

    #[test]
    fn test_edge_reflects_without_clamping() {
        let mut prey = prey_in(PreyState::Moving, 10);
        prey.pos = Vec2::new(1.0, 300.0);
        prey.vel = Vec2::new(-3.0, 1.0);

        integrate(&mut prey, VIEW);
        assert_eq!(prey.pos, Vec2::new(-2.0, 301.0));
        assert_eq!(prey.vel, Vec2::new(3.0, 1.0));

        // Still outside but heading back in: no second flip
        integrate(&mut prey, VIEW);
        assert_eq!(prey.vel, Vec2::new(3.0, 1.0));
        assert_eq!(prey.pos, Vec2::new(1.0, 302.0));
    }

    #[test]
    fn test_bottom_edge_reflects_y() {
        let mut prey = prey_in(PreyState::Moving, 10);
        prey.pos = Vec2::new(400.0, 599.0);
        prey.vel = Vec2::new(0.0, 2.0);
        integrate(&mut prey, VIEW);
        assert_eq!(prey.vel.y, -2.0);
        assert!((prey.angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
