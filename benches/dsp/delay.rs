//! Benchmarks for the fractional delay line.

use std::hint::black_box;

use blockfx::{dsp::FractionalDelayLine, MAX_DELAY_MS};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut buffer = input.clone();

        // Fixed whole-sample delay
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, MAX_DELAY_MS);
        line.set_delay_ms(250.0);
        group.bench_with_input(BenchmarkId::new("fixed", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                line.render(black_box(&mut buffer));
            })
        });

        // Delay time changing every sample, as under LFO modulation
        let mut line = FractionalDelayLine::new(SAMPLE_RATE, MAX_DELAY_MS);
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    line.set_delay_ms(1_000.0 + i as f32 * 0.37);
                    *sample = line.next_sample(black_box(input[i]));
                }
            })
        });
    }

    group.finish();
}
