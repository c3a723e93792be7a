//! Web Audio API backend
//!
//! Each cue becomes a tiny oscillator -> (filter) -> gain graph that is started
//! immediately and stops itself; nothing is pooled or awaited.

use wasm_bindgen::JsValue;
use web_sys::{
    AudioContext, AudioContextState, AudioParam, BiquadFilterNode, BiquadFilterType, GainNode,
    OscillatorNode, OscillatorType,
};

use super::engine::{AudioBackend, AudioError};
use super::synth::{AmbientSpec, CueSpec, FilterKind, FilterSpec, Ramp, Waveform};

fn graph_err(e: JsValue) -> AudioError {
    AudioError::Graph(format!("{e:?}"))
}

fn osc_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

/// Schedule a ramp on an automation param
fn ramp_to(param: &AudioParam, ramp: Ramp, value: f32, at: f64) -> Result<(), AudioError> {
    match ramp {
        Ramp::Linear => param.linear_ramp_to_value_at_time(value, at),
        Ramp::Exponential => param.exponential_ramp_to_value_at_time(value, at),
    }
    .map(|_| ())
    .map_err(graph_err)
}

/// Audio output through the browser's `AudioContext`
pub struct WebAudio {
    ctx: AudioContext,
    ambient_gain: Option<GainNode>,
}

impl WebAudio {
    /// Create the context (may fail outside a secure context)
    pub fn open() -> Result<Self, AudioError> {
        let ctx = AudioContext::new().map_err(|e| AudioError::Unsupported(format!("{e:?}")))?;
        Ok(Self {
            ctx,
            ambient_gain: None,
        })
    }

    fn create_osc(&self, waveform: Waveform, freq: f32) -> Result<OscillatorNode, AudioError> {
        let osc = self.ctx.create_oscillator().map_err(graph_err)?;
        osc.set_type(osc_type(waveform));
        osc.frequency().set_value(freq);
        Ok(osc)
    }

    fn create_filter(&self, spec: &FilterSpec) -> Result<BiquadFilterNode, AudioError> {
        let filter = self.ctx.create_biquad_filter().map_err(graph_err)?;
        filter.set_type(match spec.kind {
            FilterKind::Lowpass => BiquadFilterType::Lowpass,
            FilterKind::Bandpass => BiquadFilterType::Bandpass,
        });
        filter.frequency().set_value(spec.frequency);
        if let Some(q) = spec.q {
            filter.q().set_value(q);
        }
        Ok(filter)
    }
}

impl AudioBackend for WebAudio {
    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    fn start_ambient(
        &mut self,
        samples: &[f32],
        spec: &AmbientSpec,
        gain: f32,
    ) -> Result<(), AudioError> {
        let buffer = self
            .ctx
            .create_buffer(1, samples.len() as u32, self.ctx.sample_rate())
            .map_err(graph_err)?;
        let mut data = samples.to_vec();
        buffer.copy_to_channel(&mut data, 0).map_err(graph_err)?;

        let source = self.ctx.create_buffer_source().map_err(graph_err)?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);

        let filter = self.create_filter(&FilterSpec {
            kind: FilterKind::Lowpass,
            frequency: spec.lowpass,
            q: None,
        })?;
        let out = self.ctx.create_gain().map_err(graph_err)?;
        out.gain().set_value(gain);

        source.connect_with_audio_node(&filter).map_err(graph_err)?;
        filter.connect_with_audio_node(&out).map_err(graph_err)?;
        out.connect_with_audio_node(&self.ctx.destination())
            .map_err(graph_err)?;
        source.start().map_err(graph_err)?;

        self.ambient_gain = Some(out);
        Ok(())
    }

    fn set_ambient_gain(&mut self, gain: f32) {
        if let Some(out) = &self.ambient_gain {
            out.gain().set_value(gain);
        }
    }

    fn play_cue(&mut self, spec: &CueSpec, vol: f32) -> Result<(), AudioError> {
        let t = self.ctx.current_time();
        let osc = self.create_osc(spec.waveform, spec.sweep.from)?;
        let gain = self.ctx.create_gain().map_err(graph_err)?;

        osc.frequency()
            .set_value_at_time(spec.sweep.from, t)
            .map_err(graph_err)?;
        ramp_to(
            &osc.frequency(),
            spec.sweep.ramp,
            spec.sweep.to,
            t + spec.sweep.duration,
        )?;

        gain.gain()
            .set_value_at_time(spec.envelope.start * vol, t)
            .map_err(graph_err)?;
        for seg in spec.envelope.segments {
            ramp_to(&gain.gain(), seg.ramp, seg.target * vol, t + seg.at)?;
        }

        match &spec.filter {
            Some(f) => {
                let filter = self.create_filter(f)?;
                osc.connect_with_audio_node(&filter).map_err(graph_err)?;
                filter.connect_with_audio_node(&gain).map_err(graph_err)?;
            }
            None => {
                osc.connect_with_audio_node(&gain).map_err(graph_err)?;
            }
        }
        gain.connect_with_audio_node(&self.ctx.destination())
            .map_err(graph_err)?;

        // Frequency modulation: lfo -> depth gain -> osc.frequency
        if let Some(lfo) = &spec.lfo {
            let lfo_osc = self.create_osc(lfo.waveform, lfo.frequency)?;
            let depth = self.ctx.create_gain().map_err(graph_err)?;
            depth.gain().set_value(lfo.depth);
            lfo_osc.connect_with_audio_node(&depth).map_err(graph_err)?;
            depth
                .connect_with_audio_param(&osc.frequency())
                .map_err(graph_err)?;
            lfo_osc.start().map_err(graph_err)?;
            lfo_osc.stop_with_when(t + spec.duration).map_err(graph_err)?;
        }

        osc.start().map_err(graph_err)?;
        osc.stop_with_when(t + spec.duration).map_err(graph_err)?;
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        self.ctx.state() == AudioContextState::Suspended
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.ctx.resume().map(|_| ()).map_err(graph_err)
    }
}
