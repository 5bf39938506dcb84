//! Benchmarks for low-level DSP primitives.

mod delay;
mod oscillator;
mod window;

pub use delay::bench_delay;
pub use oscillator::bench_oscillator;
pub use window::bench_window;
