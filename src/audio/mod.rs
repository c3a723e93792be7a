//! Procedural audio
//!
//! Every sound is synthesized - no external files needed!
//! - `synth`: recipes for the ambient bed and the one-shot cues
//! - `engine`: lazily opened engine, generic over its output backend
//! - `web`: Web Audio API backend (wasm only)

pub mod engine;
pub mod synth;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{AudioBackend, AudioEngine, AudioError, EngineState, NoOutput};
pub use synth::{AMBIENT, CueSpec, Envelope, Sweep};

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Mouse scrambling away
    Scurry,
    /// Bird tweet, also the catch jingle
    Chirp,
    /// Every tap/press
    Thump,
}

/// What gameplay code needs from the audio engine
pub trait AudioService {
    /// Open audio on the first call; resume a host-suspended context on every
    /// call. Safe to call redundantly.
    fn begin(&mut self);

    /// Fire-and-forget a cue. Does nothing before `begin` succeeded.
    fn play(&mut self, cue: SoundCue);

    /// Whether output has started (for UI hints only)
    fn is_started(&self) -> bool;
}

/// Backend used by the current target
#[cfg(target_arch = "wasm32")]
pub type PlatformBackend = web::WebAudio;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformBackend = NoOutput;

/// Open the current target's backend
pub fn open_platform() -> Result<PlatformBackend, AudioError> {
    PlatformBackend::open()
}
