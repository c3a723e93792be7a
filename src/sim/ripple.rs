//! Tap ripples - purely cosmetic feedback, nothing else reads them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{RIPPLE_FADE, RIPPLE_GROWTH};

/// An expanding, fading ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    /// 1.0 at spawn, gone at <= 0
    pub alpha: f32,
}

impl Ripple {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: 0.0,
            alpha: 1.0,
        }
    }

    fn step(&mut self) {
        self.radius += RIPPLE_GROWTH;
        self.alpha -= RIPPLE_FADE;
    }
}

/// Live ripples in no particular order
#[derive(Debug, Clone, Default)]
pub struct RipplePool {
    ripples: Vec<Ripple>,
}

impl RipplePool {
    pub fn spawn(&mut self, center: Vec2) {
        self.ripples.push(Ripple::new(center));
    }

    /// Grow and fade every ripple, dropping the ones that faded out
    pub fn step(&mut self) {
        for ripple in &mut self.ripples {
            ripple.step();
        }
        self.ripples.retain(|r| r.alpha > 0.0);
    }

    pub fn as_slice(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}
