//! Synthesis recipes
//!
//! Every sound is described as plain data here and turned into a signal graph
//! by a backend. Parameter curves follow Web Audio automation semantics so the
//! numbers below can be checked without a browser.

use rand::Rng;

use super::SoundCue;

/// Oscillator shapes used by the cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// Interpolation between two automation points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Linear,
    Exponential,
}

impl Ramp {
    /// Value `frac` (0..=1) of the way from `from` to `to`
    fn interpolate(self, from: f32, to: f32, frac: f32) -> f32 {
        match self {
            Ramp::Linear => from + (to - from) * frac,
            // Exponential ramps are undefined through zero; hold the start value
            Ramp::Exponential if from <= 0.0 || to <= 0.0 => from,
            Ramp::Exponential => from * (to / from).powf(frac),
        }
    }
}

/// Oscillator frequency glide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from: f32,
    pub to: f32,
    /// Seconds from cue start
    pub duration: f64,
    pub ramp: Ramp,
}

impl Sweep {
    /// Frequency at `t` seconds after the cue starts
    pub fn value_at(&self, t: f64) -> f32 {
        if t <= 0.0 {
            return self.from;
        }
        if t >= self.duration {
            return self.to;
        }
        let frac = (t / self.duration) as f32;
        self.ramp.interpolate(self.from, self.to, frac)
    }
}

/// One automation point of an envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub ramp: Ramp,
    pub target: f32,
    /// Seconds from cue start at which `target` is reached
    pub at: f64,
}

/// Gain envelope: an initial value followed by ramps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub start: f32,
    pub segments: &'static [Segment],
}

impl Envelope {
    /// Gain at `t` seconds after the cue starts
    pub fn value_at(&self, t: f64) -> f32 {
        let mut prev_value = self.start;
        let mut prev_at = 0.0;
        for seg in self.segments {
            if t < seg.at {
                let span = seg.at - prev_at;
                if span <= 0.0 || t <= prev_at {
                    return prev_value;
                }
                let frac = ((t - prev_at) / span) as f32;
                return seg.ramp.interpolate(prev_value, seg.target, frac);
            }
            prev_value = seg.target;
            prev_at = seg.at;
        }
        prev_value
    }

    /// Largest gain the envelope reaches
    pub fn peak(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.target)
            .fold(self.start, f32::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Bandpass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub frequency: f32,
    pub q: Option<f32>,
}

/// Low-frequency oscillator routed into the main oscillator's frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LfoSpec {
    pub waveform: Waveform,
    pub frequency: f32,
    /// Peak frequency deviation in Hz
    pub depth: f32,
}

/// Full recipe for a one-shot cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueSpec {
    pub waveform: Waveform,
    pub sweep: Sweep,
    pub lfo: Option<LfoSpec>,
    pub filter: Option<FilterSpec>,
    pub envelope: Envelope,
    /// Seconds until the oscillators are stopped
    pub duration: f64,
}

/// Envelope floor for exponential decays (Web Audio can't ramp to zero)
pub const SILENCE: f32 = 0.001;

const SCURRY_ENVELOPE: &[Segment] = &[Segment {
    ramp: Ramp::Exponential,
    target: SILENCE,
    at: 0.15,
}];

const CHIRP_ENVELOPE: &[Segment] = &[
    Segment {
        ramp: Ramp::Linear,
        target: 0.1,
        at: 0.02,
    },
    Segment {
        ramp: Ramp::Exponential,
        target: SILENCE,
        at: 0.1,
    },
];

const THUMP_ENVELOPE: &[Segment] = &[Segment {
    ramp: Ramp::Exponential,
    target: SILENCE,
    at: 0.1,
}];

impl SoundCue {
    /// Synthesis recipe for this cue
    pub fn spec(self) -> CueSpec {
        match self {
            // Scratchy buzz: triangle warbled by a fast square LFO
            SoundCue::Scurry => CueSpec {
                waveform: Waveform::Triangle,
                sweep: Sweep {
                    from: 800.0,
                    to: 1200.0,
                    duration: 0.1,
                    ramp: Ramp::Linear,
                },
                lfo: Some(LfoSpec {
                    waveform: Waveform::Square,
                    frequency: 50.0,
                    depth: 500.0,
                }),
                filter: Some(FilterSpec {
                    kind: FilterKind::Bandpass,
                    frequency: 2000.0,
                    q: Some(1.0),
                }),
                envelope: Envelope {
                    start: 0.05,
                    segments: SCURRY_ENVELOPE,
                },
                duration: 0.15,
            },
            // Falling tweet
            SoundCue::Chirp => CueSpec {
                waveform: Waveform::Sine,
                sweep: Sweep {
                    from: 2000.0,
                    to: 1000.0,
                    duration: 0.1,
                    ramp: Ramp::Exponential,
                },
                lfo: None,
                filter: None,
                envelope: Envelope {
                    start: 0.0,
                    segments: CHIRP_ENVELOPE,
                },
                duration: 0.15,
            },
            // Soft low knock
            SoundCue::Thump => CueSpec {
                waveform: Waveform::Sine,
                sweep: Sweep {
                    from: 150.0,
                    to: 40.0,
                    duration: 0.1,
                    ramp: Ramp::Exponential,
                },
                lfo: None,
                filter: None,
                envelope: Envelope {
                    start: 0.5,
                    segments: THUMP_ENVELOPE,
                },
                duration: 0.15,
            },
        }
    }
}

/// Looping background texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientSpec {
    /// Loop length in seconds
    pub seconds: f32,
    pub lowpass: f32,
    pub gain: f32,
}

pub const AMBIENT: AmbientSpec = AmbientSpec {
    seconds: 2.0,
    lowpass: 400.0,
    gain: 0.05,
};

/// Leaky integrator turning white noise into a brown-ish random walk
#[derive(Debug, Clone, Default)]
pub struct LeakyIntegrator {
    last: f32,
}

impl LeakyIntegrator {
    pub const INPUT: f32 = 0.02;
    pub const LEAK: f32 = 1.02;
    /// Restores the amplitude lost to integration
    pub const MAKEUP: f32 = 3.5;

    /// Feed one uniform sample in [-1, 1], get one output sample
    pub fn next(&mut self, white: f32) -> f32 {
        self.last = (self.last + Self::INPUT * white) / Self::LEAK;
        self.last * Self::MAKEUP
    }
}

/// Fill `len` samples of leaky-integrated noise
pub fn brown_noise(len: usize, rng: &mut impl Rng) -> Vec<f32> {
    let mut integrator = LeakyIntegrator::default();
    (0..len)
        .map(|_| integrator.next(rng.random_range(-1.0..=1.0)))
        .collect()
}

/// Buffer length in samples for the ambient loop
pub fn ambient_len(sample_rate: f32) -> usize {
    (sample_rate * AMBIENT.seconds).round().max(1.0) as usize
}
