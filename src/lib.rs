//! Critter Catch - tap the critter before it hides
//!
//! Core modules:
//! - `sim`: Prey state machine, frame-coupled physics, hit resolution
//! - `audio`: Procedural audio engine (ambient bed + one-shot cues)
//! - `game`: Session that owns the game state and the audio service
//! - `renderer`: Canvas 2D drawing of a frame snapshot
//! - `platform`: Browser host shell (canvas, listeners, frame loop)

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Prey size constant (px); the hit radius is twice this
    pub const PREY_SIZE: f32 = 30.0;
    /// Base travel speed in px per tick
    pub const BASE_SPEED: f32 = 3.0;
    /// Flee speed multiplier applied to BASE_SPEED on a near miss
    pub const FLEE_SPEED_FACTOR: f32 = 1.5;
    /// Velocity multiplier per tick while idle or hiding
    pub const FRICTION: f32 = 0.92;

    /// Interaction radii
    pub const HIT_RADIUS: f32 = 2.0 * PREY_SIZE;
    pub const ALERT_RADIUS: f32 = 200.0;

    /// Timer ranges in ticks (half-open)
    pub const MOVE_TICKS: (i32, i32) = (10, 50);
    pub const IDLE_TICKS: (i32, i32) = (30, 120);
    pub const HIDE_TICKS: i32 = 200;
    pub const REST_AFTER_HIDING_TICKS: i32 = 30;
    pub const RESPAWN_IDLE_TICKS: i32 = 60;

    /// Chance an idle prey heads for a hiding spot instead of a random point
    pub const SEEK_SPOT_CHANCE: f64 = 0.6;
    /// Chance a departing prey makes a sound
    pub const DEPART_CUE_CHANCE: f64 = 0.7;

    /// Margins from the viewport edges
    pub const WANDER_MARGIN: f32 = 50.0;
    pub const RESPAWN_MARGIN: f32 = 100.0;
    pub const SPOT_MARGIN: f32 = 100.0;

    /// Hiding spots: one per this many square px, never fewer than MIN_SPOTS
    pub const AREA_PER_SPOT: f32 = 200_000.0;
    pub const MIN_SPOTS: usize = 3;
    pub const SPOT_RADIUS: (f32, f32) = (50.0, 90.0);

    /// Ripple growth and fade per tick
    pub const RIPPLE_GROWTH: f32 = 5.0;
    pub const RIPPLE_FADE: f32 = 0.03;
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Midpoint-safe bounds for a random coordinate `margin` px inside `[0, extent]`.
///
/// Returns `None` when the viewport is too small to leave any room, in which
/// case callers pin the coordinate to the middle of the axis.
#[inline]
pub fn inset_range(extent: f32, margin: f32) -> Option<(f32, f32)> {
    let lo = margin;
    let hi = extent - margin;
    (hi > lo).then_some((lo, hi))
}
