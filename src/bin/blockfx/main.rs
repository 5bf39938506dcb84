//! blockfx - terminal player for the arpeggiator → granulator → tap delay chain
//!
//! Run with: cargo run -- [ROOT NOTES...]
//! e.g.      cargo run -- A F C G

mod app;
mod ui;

use app::Player;
use blockfx::{
    patch::{ArpeggiatorParams, EnginePatch, GrainFeatures, GranulatorParams, TapDelayParams},
    sequencing::{ArpeggioStyle, PatternShape, RootNote, RootSequence},
};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let root_notes = parse_roots(std::env::args().skip(1))?;

    let patch = EnginePatch {
        arpeggiator: ArpeggiatorParams {
            rate_hz: 6.0,
            root_notes,
            chord_repeat: 2,
            glide_ms: 40.0,
            shape: PatternShape::new(ArpeggioStyle::UpDown),
            ..ArpeggiatorParams::default()
        },
        granulator: GranulatorParams {
            grain_size_ms: 30.0,
            randomness_pct: 20.0,
            features: GrainFeatures {
                random_offset: true,
                ..GrainFeatures::PITCHED
            },
            ..GranulatorParams::default()
        },
        tap_delay: TapDelayParams {
            tap_count: 3,
            wet: 0.35,
            modulated: true,
            lfo_frequency_hz: 0.3,
            lfo_depth_ms: 15.0,
            ..TapDelayParams::default()
        },
        ..EnginePatch::default()
    };

    Player::new(patch).run()
}

/// Strictly parse root-note labels from the command line; none means the
/// classic A F C G progression.
fn parse_roots(args: impl Iterator<Item = String>) -> EyreResult<RootSequence> {
    let notes = args
        .map(|label| label.parse::<RootNote>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("invalid root note on the command line")?;

    if notes.len() > blockfx::sequencing::notes::MAX_ROOT_NOTES {
        return Err(eyre!(
            "at most {} root notes are supported, got {}",
            blockfx::sequencing::notes::MAX_ROOT_NOTES,
            notes.len()
        ));
    }

    if notes.is_empty() {
        Ok(RootSequence::from_notes(&[
            RootNote::A,
            RootNote::F,
            RootNote::C,
            RootNote::G,
        ]))
    } else {
        Ok(RootSequence::from_notes(&notes))
    }
}
