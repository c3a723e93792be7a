//! Hiding spots
//!
//! A fixed set of round refuges per viewport size. They never move; a resize
//! throws the whole set away and rolls a new one.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::state::random_inset_point;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotKind {
    Rug,
    Leaves,
}

impl SpotKind {
    fn palette(self) -> &'static [u32] {
        match self {
            SpotKind::Rug => &[0x8B3A3A, 0xA0522D, 0x7B4B94, 0xB5651D],
            SpotKind::Leaves => &[0x2E7D32, 0x558B2F, 0x6B8E23, 0x33691E],
        }
    }
}

/// A place the prey can hide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HidingSpot {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub kind: SpotKind,
    /// 0xRRGGBB
    pub color: u32,
}

impl HidingSpot {
    /// True if `point` is strictly inside the spot
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) < self.radius
    }
}

/// max(3, floor(area / 200000))
pub fn spot_count(viewport: Vec2) -> usize {
    let area = viewport.x * viewport.y;
    ((area / AREA_PER_SPOT).floor().max(0.0) as usize).max(MIN_SPOTS)
}

/// Roll a fresh set of spots for the viewport
pub fn generate_spots(viewport: Vec2, rng: &mut impl Rng) -> Vec<HidingSpot> {
    (0..spot_count(viewport) as u32)
        .map(|id| {
            let kind = if rng.random_bool(0.5) {
                SpotKind::Rug
            } else {
                SpotKind::Leaves
            };
            let color = kind.palette().choose(rng).copied().unwrap_or(0x808080);
            HidingSpot {
                id,
                center: random_inset_point(viewport, SPOT_MARGIN, rng),
                radius: rng.random_range(SPOT_RADIUS.0..SPOT_RADIUS.1),
                kind,
                color,
            }
        })
        .collect()
}

/// First spot containing `point`, if any
pub fn spot_at(spots: &[HidingSpot], point: Vec2) -> Option<&HidingSpot> {
    spots.iter().find(|s| s.contains(point))
}
