//! Game state and core simulation types
//!
//! Everything the renderer reads each frame lives here. All of it is
//! ephemeral: nothing is saved between sessions.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ripple::{Ripple, RipplePool};
use super::spots::{HidingSpot, generate_spots};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::{angle_between, heading, inset_range};

/// Behavior state of the prey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreyState {
    /// Sitting still, velocity bleeding off
    Idle,
    /// Travelling in a straight line, bouncing off the viewport edges
    Moving,
    /// Tucked into a hiding spot
    Hiding,
}

/// What the prey looks and sounds like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Mouse,
    Bird,
}

impl Species {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Species::Mouse
        } else {
            Species::Bird
        }
    }

    /// Sound made when setting off
    pub fn cue(self) -> SoundCue {
        match self {
            Species::Mouse => SoundCue::Scurry,
            Species::Bird => SoundCue::Chirp,
        }
    }
}

/// The critter the player is trying to catch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians)
    pub angle: f32,
    pub state: PreyState,
    /// Ticks left in the current state
    pub timer: i32,
    /// Where it was heading when it last set off
    pub target: Option<Vec2>,
    pub species: Species,
}

impl Prey {
    pub fn new(pos: Vec2, species: Species) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            state: PreyState::Idle,
            timer: RESPAWN_IDLE_TICKS,
            target: None,
            species,
        }
    }

    /// Put the prey somewhere new after a catch
    pub fn respawn(&mut self, viewport: Vec2, rng: &mut impl Rng) {
        self.pos = random_inset_point(viewport, RESPAWN_MARGIN, rng);
        self.vel = Vec2::ZERO;
        self.state = PreyState::Idle;
        self.timer = RESPAWN_IDLE_TICKS;
        self.target = None;
        self.species = Species::random(rng);
    }

    /// Bolt directly away from `threat`. The timer and target are left alone,
    /// so the usual Moving expiry (including ducking into a spot) still applies.
    pub fn flee_from(&mut self, threat: Vec2) {
        let theta = angle_between(threat, self.pos);
        self.vel = heading(theta) * BASE_SPEED * FLEE_SPEED_FACTOR;
        self.angle = theta;
        self.state = PreyState::Moving;
    }
}

/// Uniform point at least `margin` px from every edge. An axis too short for
/// the margin pins the coordinate to its midpoint.
pub fn random_inset_point(viewport: Vec2, margin: f32, rng: &mut impl Rng) -> Vec2 {
    let mut axis = |extent: f32| match inset_range(extent, margin) {
        Some((lo, hi)) => rng.random_range(lo..hi),
        None => extent / 2.0,
    };
    let x = axis(viewport.x);
    let y = axis(viewport.y);
    Vec2::new(x, y)
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Drawing surface size in px
    pub viewport: Vec2,
    pub prey: Prey,
    /// Refuges for the current viewport
    pub spots: Vec<HidingSpot>,
    /// Visual tap feedback (not gameplay-affecting)
    pub ripples: RipplePool,
    /// Catches so far
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session sized to the viewport
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let viewport = Vec2::new(width, height);
        let spots = generate_spots(viewport, &mut rng);
        let species = Species::random(&mut rng);
        Self {
            viewport,
            prey: Prey::new(viewport / 2.0, species),
            spots,
            ripples: RipplePool::default(),
            score: 0,
            time_ticks: 0,
            rng,
        }
    }

    /// Adopt a new viewport size. Hiding spots are rebuilt from scratch when
    /// the size actually changed; returns whether it did.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let viewport = Vec2::new(width, height);
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.spots = generate_spots(viewport, &mut self.rng);
        log::debug!(
            "Viewport {}x{} -> {} hiding spots",
            width,
            height,
            self.spots.len()
        );
        true
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self, audio_started: bool) -> Snapshot<'_> {
        Snapshot {
            viewport: self.viewport,
            prey: &self.prey,
            spots: &self.spots,
            ripples: self.ripples.as_slice(),
            score: self.score,
            audio_started,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub viewport: Vec2,
    pub prey: &'a Prey,
    pub spots: &'a [HidingSpot],
    pub ripples: &'a [Ripple],
    pub score: u32,
    /// Only used to show a "tap for sound" hint
    pub audio_started: bool,
}
