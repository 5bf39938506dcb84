//! Benchmarks for DSP primitives and full engine chains.
//!
//! Run with: cargo bench
//!
//! Every engine must finish a block well inside the real-time deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Primitives (oscillator + glide, delay line, Hann window, LFO)
//!   - scenarios/*  Individual engines and the full arpeggiator → granulator → delay chain

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f32 = 48_000.0;

criterion_group!(
    benches,
    // Primitives
    dsp::bench_oscillator,
    dsp::bench_delay,
    dsp::bench_window,
    // Engines
    scenarios::bench_engines,
    scenarios::bench_chain,
);
criterion_main!(benches);
