//! Audio engine lifecycle
//!
//! The engine starts out uninitialized and opens its backend on the first
//! user gesture, since browsers refuse to produce sound before one. After that
//! it only nudges a host-suspended context back to life.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::synth::{AMBIENT, AmbientSpec, CueSpec, ambient_len, brown_noise};
use super::{AudioService, SoundCue};
use crate::Settings;

#[derive(Debug, Error)]
pub enum AudioError {
    /// The host can't (or won't) give us an audio context
    #[error("audio output unavailable: {0}")]
    Unsupported(String),
    /// Building or wiring a node failed
    #[error("failed to build audio graph: {0}")]
    Graph(String),
}

/// Something that can turn synthesis recipes into sound
pub trait AudioBackend {
    fn sample_rate(&self) -> f32;

    /// Start the looping ambient bed from pre-rendered samples
    fn start_ambient(
        &mut self,
        samples: &[f32],
        spec: &AmbientSpec,
        gain: f32,
    ) -> Result<(), AudioError>;

    /// Change the bed's output gain (volume/mute changes)
    fn set_ambient_gain(&mut self, gain: f32);

    /// Build, start and schedule the stop of a one-shot cue
    fn play_cue(&mut self, spec: &CueSpec, gain: f32) -> Result<(), AudioError>;

    /// True if the host paused output (autoplay policy)
    fn is_suspended(&self) -> bool;

    fn resume(&mut self) -> Result<(), AudioError>;
}

/// Backend for targets without audio output. It can never be constructed, so
/// an engine using it always ends up `Unavailable`.
#[derive(Debug)]
pub enum NoOutput {}

impl NoOutput {
    pub fn open() -> Result<Self, AudioError> {
        Err(AudioError::Unsupported(
            "no audio output on this platform".into(),
        ))
    }
}

impl AudioBackend for NoOutput {
    fn sample_rate(&self) -> f32 {
        match *self {}
    }

    fn start_ambient(&mut self, _: &[f32], _: &AmbientSpec, _: f32) -> Result<(), AudioError> {
        match *self {}
    }

    fn set_ambient_gain(&mut self, _: f32) {
        match *self {}
    }

    fn play_cue(&mut self, _: &CueSpec, _: f32) -> Result<(), AudioError> {
        match *self {}
    }

    fn is_suspended(&self) -> bool {
        match *self {}
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        match *self {}
    }
}

/// Lifecycle of the engine
#[derive(Debug)]
pub enum EngineState<B> {
    /// No user gesture yet
    Uninitialized,
    /// Context open, ambient bed running
    Active(B),
    /// Host refused; stay silent for the rest of the session
    Unavailable,
}

type Opener<B> = Box<dyn Fn() -> Result<B, AudioError>>;

/// Procedural audio engine owned by the game session
pub struct AudioEngine<B> {
    open: Opener<B>,
    state: EngineState<B>,
    rng: Pcg32,
    master_volume: f32,
    sfx_volume: f32,
    ambient_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioEngine<B> {
    /// `open` is called once, on the first `begin`
    pub fn new(seed: u64, open: impl Fn() -> Result<B, AudioError> + 'static) -> Self {
        let defaults = Settings::default();
        Self {
            open: Box::new(open),
            state: EngineState::Uninitialized,
            rng: Pcg32::seed_from_u64(seed),
            master_volume: defaults.master_volume,
            sfx_volume: defaults.sfx_volume,
            ambient_volume: defaults.ambient_volume,
            muted: defaults.muted,
        }
    }

    pub fn state(&self) -> &EngineState<B> {
        &self.state
    }

    /// Pick up volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.ambient_volume = settings.ambient_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
        let gain = self.ambient_gain();
        if let EngineState::Active(backend) = &mut self.state {
            backend.set_ambient_gain(gain);
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let gain = self.ambient_gain();
        if let EngineState::Active(backend) = &mut self.state {
            backend.set_ambient_gain(gain);
        }
    }

    /// Cue volume multiplier
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Output gain of the ambient bed
    fn ambient_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            AMBIENT.gain * self.master_volume * self.ambient_volume
        }
    }

    /// Open the backend and start the ambient loop
    fn open_backend(&mut self) -> EngineState<B> {
        let mut backend = match (self.open)() {
            Ok(backend) => backend,
            Err(e) => {
                log::warn!("{e} - audio disabled");
                return EngineState::Unavailable;
            }
        };

        let rate = backend.sample_rate();
        let bed = brown_noise(ambient_len(rate), &mut self.rng);
        if let Err(e) = backend.start_ambient(&bed, &AMBIENT, self.ambient_gain()) {
            log::warn!("Ambient bed failed to start: {e}");
        }
        log::info!("Audio started at {rate} Hz");
        EngineState::Active(backend)
    }
}

impl<B: AudioBackend> AudioService for AudioEngine<B> {
    fn begin(&mut self) {
        if matches!(self.state, EngineState::Uninitialized) {
            self.state = self.open_backend();
        }

        // Resume context if suspended (browsers require user gesture)
        if let EngineState::Active(backend) = &mut self.state {
            if backend.is_suspended() {
                if let Err(e) = backend.resume() {
                    log::debug!("Audio resume failed: {e}");
                }
            }
        }
    }

    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let EngineState::Active(backend) = &mut self.state else {
            return;
        };
        if let Err(e) = backend.play_cue(&cue.spec(), vol) {
            log::debug!("Dropped {cue:?} cue: {e}");
        }
    }

    fn is_started(&self) -> bool {
        matches!(self.state, EngineState::Active(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Log {
        opens: u32,
        ambient_starts: u32,
        ambient_len: usize,
        ambient_gain: f32,
        resumes: u32,
        suspended: bool,
        cues: Vec<(CueSpec, f32)>,
    }

    struct MockBackend {
        log: Rc<RefCell<Log>>,
    }

    impl AudioBackend for MockBackend {
        fn sample_rate(&self) -> f32 {
            8_000.0
        }

        fn start_ambient(
            &mut self,
            samples: &[f32],
            _spec: &AmbientSpec,
            gain: f32,
        ) -> Result<(), AudioError> {
            let mut log = self.log.borrow_mut();
            log.ambient_starts += 1;
            log.ambient_len = samples.len();
            log.ambient_gain = gain;
            Ok(())
        }

        fn set_ambient_gain(&mut self, gain: f32) {
            self.log.borrow_mut().ambient_gain = gain;
        }

        fn play_cue(&mut self, spec: &CueSpec, gain: f32) -> Result<(), AudioError> {
            self.log.borrow_mut().cues.push((*spec, gain));
            Ok(())
        }

        fn is_suspended(&self) -> bool {
            self.log.borrow().suspended
        }

        fn resume(&mut self) -> Result<(), AudioError> {
            let mut log = self.log.borrow_mut();
            log.resumes += 1;
            log.suspended = false;
            Ok(())
        }
    }

    fn mock_engine() -> (AudioEngine<MockBackend>, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let shared = log.clone();
        let engine = AudioEngine::new(1, move || {
            shared.borrow_mut().opens += 1;
            Ok(MockBackend {
                log: shared.clone(),
            })
        });
        (engine, log)
    }

    #[test]
    fn test_begin_twice_creates_one_bed() {
        let (mut engine, log) = mock_engine();
        assert!(!engine.is_started());

        engine.begin();
        assert!(engine.is_started());
        log.borrow_mut().suspended = true;
        engine.begin();

        let log = log.borrow();
        assert_eq!(log.opens, 1);
        assert_eq!(log.ambient_starts, 1);
        assert_eq!(log.ambient_len, 16_000);
        assert_eq!(log.resumes, 1);
    }

    #[test]
    fn test_begin_skips_resume_when_running() {
        let (mut engine, log) = mock_engine();
        engine.begin();
        engine.begin();
        assert_eq!(log.borrow().resumes, 0);
    }

    #[test]
    fn test_cues_wait_for_begin() {
        let (mut engine, log) = mock_engine();
        engine.play(SoundCue::Thump);
        assert!(log.borrow().cues.is_empty());

        engine.begin();
        engine.play(SoundCue::Thump);
        engine.play(SoundCue::Chirp);
        let log = log.borrow();
        assert_eq!(log.cues.len(), 2);
        assert_eq!(log.cues[0].0, SoundCue::Thump.spec());
        assert!((log.cues[0].1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_levels_match_recipes() {
        let (mut engine, log) = mock_engine();
        engine.begin();
        engine.play(SoundCue::Thump);
        engine.play(SoundCue::Chirp);

        let log = log.borrow();
        assert!((log.ambient_gain - 0.05).abs() < 1e-6);
        let (thump, gain) = log.cues[0];
        assert!((thump.envelope.start * gain - 0.5).abs() < 1e-6);
        let (chirp, gain) = log.cues[1];
        assert!((chirp.envelope.peak() * gain - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_muted_engine_plays_nothing() {
        let (mut engine, log) = mock_engine();
        engine.begin();
        engine.set_muted(true);
        engine.play(SoundCue::Scurry);
        assert!(log.borrow().cues.is_empty());
        assert_eq!(log.borrow().ambient_gain, 0.0);

        engine.set_muted(false);
        assert!(log.borrow().ambient_gain > 0.0);
    }

    #[test]
    fn test_apply_settings_scales_bed() {
        let (mut engine, log) = mock_engine();
        engine.begin();
        let settings = Settings {
            master_volume: 0.5,
            ambient_volume: 0.5,
            ..Settings::default()
        };
        engine.apply_settings(&settings);
        let expected = AMBIENT.gain * 0.25;
        assert!((log.borrow().ambient_gain - expected).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_backend_degrades_silently() {
        let mut engine: AudioEngine<NoOutput> = AudioEngine::new(3, NoOutput::open);
        engine.begin();
        assert!(matches!(engine.state(), EngineState::Unavailable));
        assert!(!engine.is_started());
        // Later gestures and cues are harmless no-ops
        engine.begin();
        engine.play(SoundCue::Chirp);
        assert!(matches!(engine.state(), EngineState::Unavailable));
    }
}
