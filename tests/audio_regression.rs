use std::collections::VecDeque;

use blockfx::{
    control::ControlMessage,
    dsp::{FractionalDelayLine, GlideRamp},
    graph::{Arpeggiator, GraphNode, Granulator, MultiTapDelay, RenderCtx, Stage},
    patch::{
        ArpeggiatorParams, EnginePatch, GrainFeatures, GranulatorParams, StageBypass,
        TapDelayParams,
    },
    sequencing::{
        root_frequency, ArpeggioPattern, ArpeggioStyle, ChordScale, PatternShape, RootNote,
        RootSequence, ScaleType,
    },
    MAX_DELAY_MS,
};
use rand::{rngs::SmallRng, SeedableRng};

const SAMPLE_RATE: f32 = 48_000.0;

fn sign_changes(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .filter(|pair| (pair[0] < 0.0) != (pair[1] < 0.0))
        .count()
}

#[test]
fn arpeggiator_plays_root_at_table_pitch() {
    let params = ArpeggiatorParams {
        rate_hz: 0.5,
        glide_ms: 0.0,
        ..ArpeggiatorParams::default()
    };
    let mut arp = Arpeggiator::seeded(SAMPLE_RATE, params, 0);
    let ctx = RenderCtx::new(SAMPLE_RATE);

    // One second of A3 (220 Hz): two sign changes per cycle
    let mut out = vec![0.0; SAMPLE_RATE as usize];
    for block in out.chunks_mut(256) {
        arp.render_block(block, &ctx);
    }
    let crossings = sign_changes(&out);
    assert!((438..=442).contains(&crossings), "crossings {}", crossings);
    assert!(out.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn arpeggiator_phase_stays_wrapped() {
    let params = ArpeggiatorParams {
        rate_hz: 40.0,
        glide_ms: 3.0,
        root_notes: RootSequence::from_labels(&["G", "B", "E"]),
        shape: PatternShape::new(ArpeggioStyle::Style203130).with_low_octave(true),
        ..ArpeggiatorParams::default()
    };
    let mut arp = Arpeggiator::seeded(SAMPLE_RATE, params, 4);
    let mut block = vec![0.0; 333];
    for _ in 0..500 {
        arp.render(&mut block);
        assert!((0.0..1.0).contains(&arp.phase()));
        assert!(arp.state().pattern_index < arp.pattern().len());
    }
}

#[test]
fn glide_reaches_target_in_glide_time() {
    let mut glide = GlideRamp::new(220.0);
    let mut previous = 220.0;
    for _ in 0..4_800 {
        let f = glide.step(440.0, 100.0, SAMPLE_RATE);
        assert!(f >= previous && f <= 440.0);
        previous = f;
    }
    assert_eq!(previous, 440.0);
}

#[test]
fn major_a_pattern_tables() {
    let chord = ChordScale::lookup(ScaleType::Major, "A");
    let mut rng = SmallRng::seed_from_u64(0);
    let mut build = |style| ArpeggioPattern::build(&chord, PatternShape::new(style), &mut rng);

    assert_eq!(build(ArpeggioStyle::Up).as_slice(), &[0, 4, 7, 12]);
    assert_eq!(build(ArpeggioStyle::Down).as_slice(), &[12, 7, 4, 0]);
    assert_eq!(build(ArpeggioStyle::UpDown).as_slice(), &[0, 4, 7, 12, 7, 4]);
}

#[test]
fn root_labels() {
    assert_eq!(root_frequency("A"), 220.0);
    assert_eq!(root_frequency("Z"), 220.0);
    assert_eq!(RootNote::from_label("F").frequency(), 349.23);
}

#[test]
fn delay_beyond_five_seconds_is_clamped() {
    let mut line = FractionalDelayLine::new(SAMPLE_RATE, MAX_DELAY_MS);
    line.set_delay_ms(6_000.0);
    assert_eq!(line.delay_ms(), 5_000.0);
}

#[test]
fn granulator_silence_for_any_settings() {
    for (seed, features) in [
        GrainFeatures::NONE,
        GrainFeatures::PITCHED,
        GrainFeatures::ALL,
    ]
    .into_iter()
    .enumerate()
    {
        for grain_size_ms in [1.0, 10.0, 50.0, 400.0] {
            let params = GranulatorParams {
                grain_size_ms,
                pitch_shift_semitones: 12.0,
                randomness_pct: 80.0,
                features,
                ..GranulatorParams::default()
            };
            let mut granulator = Granulator::seeded(SAMPLE_RATE, params, seed as u64);
            let mut block = vec![0.0; 480];
            granulator.render_block(&mut block, &RenderCtx::new(SAMPLE_RATE));
            assert!(block.iter().all(|&s| s == 0.0));
        }
    }
}

#[test]
fn single_tap_dry_delay_is_identity() {
    let params = TapDelayParams {
        tap_count: 1,
        dry: 1.0,
        wet: 0.0,
        feedback: 0.0,
        ..TapDelayParams::default()
    };
    let mut delay = MultiTapDelay::new(SAMPLE_RATE, params);
    let input: Vec<f32> = (0..4_096).map(|i| ((i * 7919) % 200) as f32 / 100.0 - 1.0).collect();
    let mut block = input.clone();
    for chunk in block.chunks_mut(128) {
        delay.render_block(chunk, &RenderCtx::new(SAMPLE_RATE));
    }
    assert_eq!(block, input);
}

#[test]
fn chain_without_granulator_is_block_size_independent() {
    let patch = EnginePatch {
        bypass: StageBypass {
            granulator: true,
            ..StageBypass::default()
        },
        tap_delay: TapDelayParams {
            modulated: true,
            lfo_depth_ms: 5.0,
            ..TapDelayParams::default()
        },
        seed: Some(9),
        ..EnginePatch::default()
    };
    let ctx = RenderCtx::new(SAMPLE_RATE);

    let mut a = patch.build(SAMPLE_RATE);
    let mut whole = vec![0.0; 6_000];
    for block in whole.chunks_mut(512) {
        a.render_block(block, &ctx);
    }

    let mut b = patch.build(SAMPLE_RATE);
    let mut split = vec![0.0; 6_000];
    for block in split.chunks_mut(97) {
        b.render_block(block, &ctx);
    }

    assert_eq!(whole, split);
}

#[test]
fn full_chain_stays_finite_under_control_changes() {
    let mut chain = EnginePatch {
        seed: Some(5),
        ..EnginePatch::default()
    }
    .build(SAMPLE_RATE);
    let ctx = RenderCtx::new(SAMPLE_RATE);
    let mut queue = VecDeque::new();
    let mut block = vec![0.0; 256];

    let mut arp = ArpeggiatorParams::default();
    let mut grains = GranulatorParams {
        features: GrainFeatures::ALL,
        randomness_pct: 30.0,
        ..GranulatorParams::default()
    };
    let mut taps = TapDelayParams::default();

    for round in 0..64 {
        arp.shape.style = arp.shape.style.next();
        arp.scale = arp.scale.toggled();
        grains.grain_size_ms = 5.0 + (round % 7) as f32 * 20.0;
        taps.tap_count = 1 + round % 6;
        taps.modulated = round % 2 == 0;

        queue.push_back(ControlMessage::Arpeggiator(arp));
        queue.push_back(ControlMessage::Granulator(grains));
        queue.push_back(ControlMessage::TapDelay(taps));
        if round % 16 == 15 {
            queue.push_back(ControlMessage::Reset);
        }
        chain.drain(&mut queue);

        chain.render_block(&mut block, &ctx);
        assert!(block.iter().all(|s| s.is_finite()), "round {}", round);
    }

    assert!(!chain.is_bypassed(Stage::Granulator));
    assert_eq!(chain.tap_delay().taps().len(), 1 + 63 % 6);
}
