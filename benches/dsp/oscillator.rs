//! Benchmarks for the phase oscillator, glide ramp and LFO.

use std::hint::black_box;

use blockfx::dsp::{GlideRamp, Lfo, PhaseOscillator};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut osc = PhaseOscillator::new();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| osc.render(black_box(&mut buffer), black_box(440.0), SAMPLE_RATE))
        });

        // Oscillator driven by a glide that keeps being re-aimed
        let mut osc = PhaseOscillator::new();
        let mut glide = GlideRamp::new(220.0);
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("glided_sine", size), &size, |b, _| {
            b.iter(|| {
                flip = !flip;
                let target = if flip { 440.0 } else { 220.0 };
                for sample in buffer.iter_mut() {
                    let frequency = glide.step(black_box(target), 20.0, SAMPLE_RATE);
                    *sample = osc.next_sample(frequency, SAMPLE_RATE);
                }
            })
        });

        let mut lfo = Lfo::new(5.0);
        group.bench_with_input(BenchmarkId::new("lfo", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = lfo.next_value(SAMPLE_RATE);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
