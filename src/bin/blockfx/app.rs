//! Player - audio stream setup and the UI hand-off

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use log::{error, info};
use rtrb::RingBuffer;

use blockfx::{
    control::ControlMessage,
    graph::{GraphNode, RenderCtx, Stage},
    patch::EnginePatch,
    MAX_BLOCK_SIZE,
};

use super::ui::{StatusUpdate, UiApp};

/// Samples buffered for the oscilloscope (about 170 ms at 48 kHz)
const SCOPE_CAPACITY: usize = 8192;
const CONTROL_CAPACITY: usize = 64;
const STATUS_CAPACITY: usize = 64;

pub struct Player {
    patch: EnginePatch,
}

impl Player {
    pub fn new(patch: EnginePatch) -> Self {
        Self { patch }
    }

    /// Open the default output device, start the chain, and hand the
    /// terminal to the UI until it quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!("output: {} Hz, {} channel(s)", sample_rate, channels);

        let mut chain = self.patch.build(sample_rate);

        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_CAPACITY);
        let (mut status_tx, status_rx) = RingBuffer::<StatusUpdate>::new(STATUS_CAPACITY);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let mut ctx = RenderCtx::new(sample_rate);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                chain.drain(&mut control_rx);

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];

                    // Silence is the chain input when the arpeggiator is bypassed
                    block.fill(0.0);
                    chain.render_block(block, &ctx);
                    ctx = ctx.advanced(frames_to_render);

                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        let s = s.clamp(-1.0, 1.0);
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // Scope drops samples while the UI lags behind
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }

                let arp = chain.arpeggiator();
                let state = arp.state();
                let _ = status_tx.push(StatusUpdate {
                    time: ctx.time,
                    pattern_index: state.pattern_index,
                    pattern_len: arp.pattern().len(),
                    chord_index: state.chord_index,
                    root_hz: arp.chord().root_frequency_hz,
                    frequency_hz: arp.frequency(),
                    arpeggiator_on: !chain.is_bypassed(Stage::Arpeggiator),
                    granulator_on: !chain.is_bypassed(Stage::Granulator),
                    tap_delay_on: !chain.is_bypassed(Stage::TapDelay),
                });
            },
            |err| error!("audio stream error: {}", err),
            None,
        )?;

        stream.play().wrap_err("failed to start audio stream")?;

        let mut app = UiApp::new(self.patch, sample_rate, scope_rx, status_rx, control_tx);
        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}
