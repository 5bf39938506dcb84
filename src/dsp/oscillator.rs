use std::f32::consts::TAU;

/*
Phase Oscillator
================

A phase accumulator is the simplest way to produce a periodic waveform whose
frequency may change every sample without clicks.

Vocabulary
----------

  phase       Position inside one cycle, normalised to [0, 1).
              0.0 = start of cycle, 0.5 = halfway, 1.0 wraps back to 0.0.

  increment   How far phase moves per sample: frequency / sample_rate.
              At 440 Hz and 48 kHz: 440 / 48000 ≈ 0.00917 per sample.

  wrap        Bringing phase back into [0, 1) once it passes 1.0.


Why a normalised phase?
-----------------------

Storing phase in [0, 1) instead of radians keeps the wrap a single subtract
and makes the invariant easy to check. The waveform is computed on demand:

    sample = sin(2π · phase)

Because the increment is recomputed from the frequency each sample, a glide
(see `dsp/glide.rs`) can change the frequency continuously and the waveform
stays continuous: only the *speed* of the phase changes, never its position.

Order of operations per sample:

    1. output sin(2π · phase)
    2. phase += frequency / sample_rate
    3. wrap phase into [0, 1)

The first sample of a fresh oscillator is therefore sin(0) = 0.0.
*/

/// Normalised phase accumulator producing a sine wave.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseOscillator {
    phase: f32,
}

impl PhaseOscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Start from an arbitrary phase; values outside [0, 1) are wrapped.
    pub fn with_phase(phase: f32) -> Self {
        let mut osc = Self { phase };
        osc.wrap();
        osc
    }

    /// Sine value at the current phase, without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        (TAU * self.phase).sin()
    }

    /// Move the phase forward by one sample at `frequency`.
    #[inline]
    pub fn advance(&mut self, frequency: f32, sample_rate: f32) {
        self.phase += frequency / sample_rate;
        self.wrap();
    }

    /// Emit the current sine value, then advance by one sample.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = self.value();
        self.advance(frequency, sample_rate);
        value
    }

    /// Fill `buffer` with a fixed-frequency sine.
    pub fn render(&mut self, buffer: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn wrap(&mut self) {
        if !self.phase.is_finite() {
            self.phase = 0.0;
            return;
        }
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        // Large or negative increments can jump more than one cycle.
        if !(0.0..1.0).contains(&self.phase) {
            self.phase = self.phase.rem_euclid(1.0);
            if self.phase >= 1.0 {
                self.phase = 0.0;
            }
        }
    }
}
