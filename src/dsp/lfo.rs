//! Low Frequency Oscillator (LFO) used as a modulation source.

/*
Low Frequency Oscillators
=========================

An LFO is simply an oscillator running at sub-audio frequencies. The same
phase math as `dsp/oscillator.rs` applies; only the use is different.

Vocabulary
----------

  control-rate    Frequencies below ~20 Hz. The output is not listened to
                  directly, it moves some other parameter over time.

  bipolar         Output swings -1.0 to +1.0, so the parameter moves above
                  AND below its base value.

  depth           How far the parameter moves at the peaks:
                      value = base + depth · lfo

Delay-time modulation
---------------------

In the multi-tap delay each tap owns an LFO. Its output offsets the tap's
delay time:

    delay_ms = base_delay_ms + depth_ms · sin(2π · phase)

A moving delay time means the read head speeds up and slows down, which
bends the pitch of the echoes slightly (the chorus / tape-wow effect).

Typical frequencies: 0.1 - 2 Hz for slow wow, 4 - 7 Hz for vibrato-like
wobble. Anything above 20 Hz is clamped.
*/

use super::oscillator::PhaseOscillator;

/// Highest LFO frequency accepted, in Hz.
pub const MAX_LFO_HZ: f32 = 20.0;

/// Sine LFO with a fixed rate, independent of any note pitch.
///
/// # Example
/// ```
/// use blockfx::dsp::lfo::Lfo;
/// let mut lfo = Lfo::new(5.0);
/// let first = lfo.next_value(48_000.0);
/// assert_eq!(first, 0.0); // sine starts at zero phase
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Lfo {
    osc: PhaseOscillator,
    frequency: f32,
}

impl Lfo {
    pub fn new(frequency: f32) -> Self {
        Self::with_phase(frequency, 0.0)
    }

    /// Start at `phase` (cycles, wrapped into [0, 1)).
    pub fn with_phase(frequency: f32, phase: f32) -> Self {
        Self {
            osc: PhaseOscillator::with_phase(phase),
            frequency: clamp_frequency(frequency),
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = clamp_frequency(frequency);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.osc.phase()
    }

    /// Bipolar value for this sample, then advance.
    #[inline]
    pub fn next_value(&mut self, sample_rate: f32) -> f32 {
        self.osc.next_sample(self.frequency, sample_rate)
    }
}

fn clamp_frequency(frequency: f32) -> f32 {
    if frequency.is_nan() {
        0.0
    } else {
        frequency.clamp(0.0, MAX_LFO_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_bipolar_and_bounded() {
        let mut lfo = Lfo::new(7.0);
        let values: Vec<f32> = (0..48_000).map(|_| lfo.next_value(48_000.0)).collect();

        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(values.iter().any(|&v| v > 0.99));
        assert!(values.iter().any(|&v| v < -0.99));
    }

    #[test]
    fn frequency_is_clamped() {
        assert_eq!(Lfo::new(100.0).frequency(), MAX_LFO_HZ);
        assert_eq!(Lfo::new(-1.0).frequency(), 0.0);
        assert_eq!(Lfo::new(f32::NAN).frequency(), 0.0);
    }

    #[test]
    fn zero_frequency_holds_phase() {
        let mut lfo = Lfo::with_phase(0.0, 0.25);
        for _ in 0..100 {
            assert!((lfo.next_value(48_000.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn one_hz_completes_a_cycle_per_second() {
        let sample_rate = 1_000.0;
        let mut lfo = Lfo::new(1.0);
        for _ in 0..250 {
            lfo.next_value(sample_rate);
        }
        assert!((lfo.phase() - 0.25).abs() < 1e-3);
    }
}
