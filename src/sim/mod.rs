//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - Tick-based time only (no delta time)
//! - One owned `GameState`, mutated through `&mut`
//! - Audio reached only through the `AudioService` trait

pub mod behavior;
pub mod interaction;
pub mod ripple;
pub mod spots;
pub mod state;
pub mod tick;

pub use behavior::{integrate, step_prey};
pub use interaction::{Outcome, resolve_tap};
pub use ripple::{Ripple, RipplePool};
pub use spots::{HidingSpot, SpotKind, generate_spots, spot_count};
pub use state::{GameState, Prey, PreyState, Snapshot, Species};
pub use tick::tick;

#[cfg(test)]
pub(crate) mod testing {
    use crate::audio::{AudioService, SoundCue};

    /// Audio service that just writes down what it was asked to do
    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub begins: u32,
        pub cues: Vec<SoundCue>,
    }

    impl AudioService for RecordingAudio {
        fn begin(&mut self) {
            self.begins += 1;
        }

        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }

        fn is_started(&self) -> bool {
            self.begins > 0
        }
    }
}
