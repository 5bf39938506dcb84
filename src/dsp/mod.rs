//! Low-level DSP primitives shared by the engines.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so they can live directly inside engine structs. They stay focused on the
//! signal-processing math; the `graph` engines layer scheduling and parameter
//! handling on top.

/// Circular buffer with linearly interpolated fractional reads.
pub mod delay;
/// Linear frequency ramp (portamento).
pub mod glide;
/// Sine LFO for parameter modulation.
pub mod lfo;
/// Normalised phase accumulator producing a sine.
pub mod oscillator;
/// Precomputed Hann window table for grain envelopes.
pub mod window;

pub use delay::FractionalDelayLine;
pub use glide::GlideRamp;
pub use lfo::Lfo;
pub use oscillator::PhaseOscillator;
pub use window::HannWindow;
