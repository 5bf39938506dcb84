/*
Engine Parameters
=================

Every engine is configured by a small `Copy` struct whose `Default` carries
the values a freshly created engine starts with:

    Arpeggiator     rate 2.0 steps/s, Major, root notes [A], repeat 1,
                    glide 100 ms, style Up
    Granulator      grain 50 ms, spacing 50 %, pitch 0 st, randomness 0 %
    TapDelay        4 taps, dry 1.0, wet 0.5, feedback 0.25,
                    LFO 1 Hz / 10 ms (off unless `modulated`)

Because the structs are `Copy` they can travel to the audio thread inside a
`ControlMessage` without allocating.

`sanitized()` replaces values an engine cannot use (NaN, negative times,
out-of-range gains) with the nearest usable value. Engines call it on every
`set_params`, so callers may pass raw UI values straight through.

An `EnginePatch` bundles the three parameter sets with per-stage bypass flags
and an optional RNG seed, and builds the whole chain:

    let chain = EnginePatch::default().build(48_000.0);
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    graph::chain::{EngineChain, Stage},
    sequencing::{PatternShape, RootNote, RootSequence, ScaleType},
    MAX_DELAY_MS, MAX_GRAIN_MS, MAX_LFO_DEPTH_MS, MAX_TAPS, MIN_RATE_HZ,
};

/// Grain pitch shift range in semitones.
pub const MAX_PITCH_SHIFT_SEMITONES: f32 = 24.0;
/// Shortest grain accepted from configuration.
pub const MIN_GRAIN_MS: f32 = 1.0;
/// Longest glide accepted from configuration.
pub const MAX_GLIDE_MS: f32 = MAX_DELAY_MS;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArpeggiatorParams {
    /// Pattern steps per second
    pub rate_hz: f32,
    pub scale: ScaleType,
    /// Chord progression; the arpeggiator moves to the next root after
    /// `chord_repeat` full passes of the pattern.
    pub root_notes: RootSequence,
    pub chord_repeat: u32,
    pub glide_ms: f32,
    pub shape: PatternShape,
}

impl Default for ArpeggiatorParams {
    fn default() -> Self {
        Self {
            rate_hz: 2.0,
            scale: ScaleType::Major,
            root_notes: RootSequence::from_notes(&[RootNote::A]),
            chord_repeat: 1,
            glide_ms: 100.0,
            shape: PatternShape::default(),
        }
    }
}

impl ArpeggiatorParams {
    pub fn sanitized(mut self) -> Self {
        self.rate_hz = finite_or(self.rate_hz, Self::default().rate_hz).max(MIN_RATE_HZ);
        self.chord_repeat = self.chord_repeat.max(1);
        self.glide_ms = finite_or(self.glide_ms, 0.0).clamp(0.0, MAX_GLIDE_MS);
        if self.root_notes.is_empty() {
            self.root_notes = RootSequence::from_notes(&[RootNote::A]);
        }
        self
    }
}

/// Optional behaviours of the granulator, one flag per variant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrainFeatures {
    /// Resample grains by `pitch_shift_semitones`
    pub pitch_shift: bool,
    /// Jitter grain start positions by up to `randomness` % of a grain
    pub random_offset: bool,
    /// Scale each grain's playback rate by a random factor in [0.5, 1.5]
    pub random_pitch: bool,
    /// Give each grain a random gain of 1.0 or 0.5
    pub stereo_bias: bool,
}

impl GrainFeatures {
    pub const NONE: GrainFeatures = GrainFeatures {
        pitch_shift: false,
        random_offset: false,
        random_pitch: false,
        stereo_bias: false,
    };

    pub const ALL: GrainFeatures = GrainFeatures {
        pitch_shift: true,
        random_offset: true,
        random_pitch: true,
        stereo_bias: true,
    };

    /// Fixed-pitch grains at a chosen transposition.
    pub const PITCHED: GrainFeatures = GrainFeatures {
        pitch_shift: true,
        ..GrainFeatures::NONE
    };

    pub fn uses_rng(&self) -> bool {
        self.random_offset || self.random_pitch || self.stereo_bias
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GranulatorParams {
    pub grain_size_ms: f32,
    /// Distance between grain starts as a percentage of the grain size
    pub grain_offset_pct: f32,
    pub pitch_shift_semitones: f32,
    /// Start-position jitter as a percentage of the grain size
    pub randomness_pct: f32,
    pub features: GrainFeatures,
}

impl Default for GranulatorParams {
    fn default() -> Self {
        Self {
            grain_size_ms: 50.0,
            grain_offset_pct: 50.0,
            pitch_shift_semitones: 0.0,
            randomness_pct: 0.0,
            features: GrainFeatures::PITCHED,
        }
    }
}

impl GranulatorParams {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.grain_size_ms =
            finite_or(self.grain_size_ms, defaults.grain_size_ms).clamp(MIN_GRAIN_MS, MAX_GRAIN_MS);
        self.grain_offset_pct =
            finite_or(self.grain_offset_pct, defaults.grain_offset_pct).clamp(0.0, 100.0);
        self.pitch_shift_semitones = finite_or(self.pitch_shift_semitones, 0.0)
            .clamp(-MAX_PITCH_SHIFT_SEMITONES, MAX_PITCH_SHIFT_SEMITONES);
        self.randomness_pct = finite_or(self.randomness_pct, 0.0).clamp(0.0, 100.0);
        self
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapDelayParams {
    pub tap_count: usize,
    pub dry: f32,
    pub wet: f32,
    pub feedback: f32,
    /// Sweep each tap's delay time with its own LFO
    pub modulated: bool,
    pub lfo_frequency_hz: f32,
    pub lfo_depth_ms: f32,
}

impl Default for TapDelayParams {
    fn default() -> Self {
        Self {
            tap_count: 4,
            dry: 1.0,
            wet: 0.5,
            feedback: 0.25,
            modulated: false,
            lfo_frequency_hz: 1.0,
            lfo_depth_ms: 10.0,
        }
    }
}

impl TapDelayParams {
    pub fn sanitized(mut self) -> Self {
        self.tap_count = self.tap_count.clamp(1, MAX_TAPS);
        self.dry = unit_gain(self.dry);
        self.wet = unit_gain(self.wet);
        self.feedback = unit_gain(self.feedback);
        self.lfo_frequency_hz =
            finite_or(self.lfo_frequency_hz, 0.0).clamp(0.0, crate::dsp::lfo::MAX_LFO_HZ);
        self.lfo_depth_ms = finite_or(self.lfo_depth_ms, 0.0).clamp(0.0, MAX_LFO_DEPTH_MS);
        self
    }

    /// True when the LFO offsets apply: modulation on with non-zero depth.
    /// A zero LFO rate still holds each tap at its phase offset.
    pub fn is_modulating(&self) -> bool {
        self.modulated && self.lfo_depth_ms > 0.0
    }
}

/// Which chain stages are skipped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageBypass {
    pub arpeggiator: bool,
    pub granulator: bool,
    pub tap_delay: bool,
}

impl StageBypass {
    pub fn get(&self, stage: Stage) -> bool {
        match stage {
            Stage::Arpeggiator => self.arpeggiator,
            Stage::Granulator => self.granulator,
            Stage::TapDelay => self.tap_delay,
        }
    }

    pub fn set(&mut self, stage: Stage, bypassed: bool) {
        match stage {
            Stage::Arpeggiator => self.arpeggiator = bypassed,
            Stage::Granulator => self.granulator = bypassed,
            Stage::TapDelay => self.tap_delay = bypassed,
        }
    }
}

/// Full chain description: arpeggiator → granulator → tap delay.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnginePatch {
    pub arpeggiator: ArpeggiatorParams,
    pub granulator: GranulatorParams,
    pub tap_delay: TapDelayParams,
    pub bypass: StageBypass,
    /// Seed for the randomised stages; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl EnginePatch {
    pub fn build(&self, sample_rate: f32) -> EngineChain {
        EngineChain::from_patch(self, sample_rate)
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamp a gain into [0, 1]; NaN becomes 0.
#[inline]
pub(crate) fn unit_gain(value: f32) -> f32 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}
