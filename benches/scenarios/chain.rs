//! Benchmarks for the full arpeggiator → granulator → tap delay chain.

use std::hint::black_box;

use blockfx::{
    graph::{GraphNode, RenderCtx},
    patch::{EnginePatch, GrainFeatures, GranulatorParams, TapDelayParams},
};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chain");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut defaults = EnginePatch {
            seed: Some(1),
            ..EnginePatch::default()
        }
        .build(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| defaults.render_block(black_box(&mut buffer), &ctx))
        });

        // Heaviest configuration the demo binary can reach
        let mut heavy = EnginePatch {
            granulator: GranulatorParams {
                grain_size_ms: 5.0,
                grain_offset_pct: 10.0,
                randomness_pct: 100.0,
                features: GrainFeatures::ALL,
                ..GranulatorParams::default()
            },
            tap_delay: TapDelayParams {
                tap_count: blockfx::MAX_TAPS,
                modulated: true,
                lfo_depth_ms: 100.0,
                ..TapDelayParams::default()
            },
            seed: Some(2),
            ..EnginePatch::default()
        }
        .build(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("heavy", size), &size, |b, _| {
            b.iter(|| heavy.render_block(black_box(&mut buffer), &ctx))
        });
    }

    group.finish();
}
