//! Benchmarks for each engine on its own.

use std::hint::black_box;

use blockfx::{
    graph::{Arpeggiator, GraphNode, Granulator, MultiTapDelay, RenderCtx},
    patch::{ArpeggiatorParams, GrainFeatures, GranulatorParams, TapDelayParams},
    sequencing::{ArpeggioStyle, PatternShape, RootSequence},
};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn source(size: usize) -> Vec<f32> {
    (0..size).map(|i| (i as f32 * 0.03).sin() * 0.5).collect()
}

pub fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engines");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let input = source(size);
        let mut buffer = vec![0.0f32; size];

        // Fast random arpeggio: step changes and pattern rebuilds inside the block
        let mut arp = Arpeggiator::seeded(
            SAMPLE_RATE,
            ArpeggiatorParams {
                rate_hz: 32.0,
                root_notes: RootSequence::from_labels(&["A", "F", "C", "G"]),
                shape: PatternShape::new(ArpeggioStyle::Random).with_mirror(true),
                ..ArpeggiatorParams::default()
            },
            1,
        );
        group.bench_with_input(BenchmarkId::new("arpeggiator", size), &size, |b, _| {
            b.iter(|| arp.render_block(black_box(&mut buffer), &ctx))
        });

        let mut plain = Granulator::seeded(SAMPLE_RATE, GranulatorParams::default(), 2);
        group.bench_with_input(BenchmarkId::new("granulator", size), &size, |b, _| {
            b.iter(|| plain.process(black_box(&input), black_box(&mut buffer)))
        });

        // Short dense grains with every random feature on
        let mut evolving = Granulator::seeded(
            SAMPLE_RATE,
            GranulatorParams {
                grain_size_ms: 5.0,
                grain_offset_pct: 25.0,
                pitch_shift_semitones: 7.0,
                randomness_pct: 50.0,
                features: GrainFeatures::ALL,
            },
            3,
        );
        group.bench_with_input(BenchmarkId::new("granulator_evolving", size), &size, |b, _| {
            b.iter(|| evolving.process(black_box(&input), black_box(&mut buffer)))
        });

        let mut taps = MultiTapDelay::new(SAMPLE_RATE, TapDelayParams::default());
        group.bench_with_input(BenchmarkId::new("tap_delay_4", size), &size, |b, _| {
            b.iter(|| taps.process(black_box(&input), black_box(&mut buffer)))
        });

        let mut modulated = MultiTapDelay::new(
            SAMPLE_RATE,
            TapDelayParams {
                tap_count: 8,
                modulated: true,
                lfo_frequency_hz: 2.0,
                lfo_depth_ms: 30.0,
                ..TapDelayParams::default()
            },
        );
        group.bench_with_input(BenchmarkId::new("tap_delay_8_modulated", size), &size, |b, _| {
            b.iter(|| modulated.process(black_box(&input), black_box(&mut buffer)))
        });
    }

    group.finish();
}
