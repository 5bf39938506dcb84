//! Benchmarks for Hann window construction.
//!
//! Rebuilding the table happens on grain-size changes, not per block, but it
//! runs on the audio thread so it still has to be cheap.

use std::hint::black_box;

use blockfx::{dsp::HannWindow, MAX_GRAIN_MS};
use criterion::{BenchmarkId, Criterion};

use crate::SAMPLE_RATE;

pub fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/window");
    let max_len = (MAX_GRAIN_MS * SAMPLE_RATE / 1000.0) as usize;

    for &grain_ms in &[10.0f32, 50.0, 200.0] {
        let len = (grain_ms * SAMPLE_RATE / 1000.0) as usize;
        let mut window = HannWindow::with_capacity(len, max_len);

        group.bench_with_input(BenchmarkId::new("resize", len), &len, |b, &len| {
            b.iter(|| window.resize(black_box(len)))
        });
    }

    group.finish();
}
