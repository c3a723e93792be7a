//! Game session
//!
//! Owns the game state and the audio service; the host feeds it input events
//! and calls `frame` once per display refresh.

use glam::Vec2;

use crate::audio::AudioService;
use crate::sim::{GameState, Outcome, Snapshot, resolve_tap, tick};

/// Input the host has already translated into game terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer/touch down at canvas coordinates
    Tap(Vec2),
    /// Primary-action key: a tap aimed straight at the prey
    PrimaryAction,
    /// Drawing surface changed size
    Resize { width: f32, height: f32 },
}

/// One play session
pub struct Game<A> {
    pub state: GameState,
    audio: A,
}

impl<A: AudioService> Game<A> {
    pub fn new(state: GameState, audio: A) -> Self {
        Self { state, audio }
    }

    /// Apply one input event. Returns the tap outcome for taps and presses.
    pub fn handle(&mut self, event: InputEvent) -> Option<Outcome> {
        match event {
            InputEvent::Tap(point) => Some(resolve_tap(&mut self.state, point, &mut self.audio)),
            InputEvent::PrimaryAction => {
                let aim = self.state.prey.pos;
                Some(resolve_tap(&mut self.state, aim, &mut self.audio))
            }
            InputEvent::Resize { width, height } => {
                self.state.resize(width, height);
                None
            }
        }
    }

    /// Run one simulation tick
    pub fn frame(&mut self) {
        tick(&mut self.state, &mut self.audio);
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot(self.audio.is_started())
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}
