use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    dsp::HannWindow,
    graph::node::{GraphNode, RenderCtx},
    patch::{GrainFeatures, GranulatorParams},
    MAX_BLOCK_SIZE, MAX_GRAIN_MS,
};

/*
Granulator
==========

Granular processing chops the incoming block into short overlapping
"grains", re-reads each one (optionally faster, slower, or from a jittered
position), fades it with a Hann window, and adds the grains back together.

    input block   ┌──────────────────────────────────────────┐
                  │ ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~ │
                  └──────────────────────────────────────────┘
    grains        ╭──╮
                     ╭──╮                       spacing = offset% × size
                        ╭──╮
                           ╭──╮  ...
    output        Σ grains (overlap-add)

Grains never outlive the block: each callback starts from a zeroed output
and schedules grains from the block start, so nothing but the window table
and the RNG carries over between calls.

Per grain:

  start   = cursor (+ random jitter of up to randomness% × size)
            clamped to [0, N − size]; 0 when the grain is longer than N
  ratio   = uniform[0.5, 1.5]               with random_pitch
          = 2^(semitones / 12)              with pitch_shift
          = 1.0                             otherwise
  gain    = 1.0 or 0.5 at random            with stereo_bias

  for i in 0..size (truncated at the block end):
      pos = start + i / ratio
      out[cursor + i] += lerp(in, pos) · hann[i] · gain

The read advances 1/ratio frames per output frame, so a ratio of 2 walks the
source at half speed. Reads past the block are held at the last frame.

Parameters
----------

Grain size (1 - 1000 ms):
  Short grains (5-20 ms) buzz and blur, long grains (100+ ms) keep the
  source recognisable. Changing it rebuilds the Hann table.

Grain offset (0 - 100 %):
  Spacing between grain starts. 50 % gives the classic two-grain overlap
  whose windows sum to roughly unity.

Pitch shift (±24 semitones), randomness (0 - 100 %):
  Only read when the matching `GrainFeatures` flag is set.
*/

pub struct Granulator {
    params: GranulatorParams,
    sample_rate: f32,
    grain_frames: usize,
    window: HannWindow,
    scratch: Vec<f32>,
    rng: SmallRng,
}

impl Granulator {
    pub fn new(sample_rate: f32, params: GranulatorParams) -> Self {
        Self::with_rng(sample_rate, params, SmallRng::from_os_rng())
    }

    pub fn seeded(sample_rate: f32, params: GranulatorParams, seed: u64) -> Self {
        Self::with_rng(sample_rate, params, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(sample_rate: f32, params: GranulatorParams, rng: SmallRng) -> Self {
        let params = params.sanitized();
        let grain_frames = grain_frames(params.grain_size_ms, sample_rate);
        let window = HannWindow::with_capacity(grain_frames, max_grain_frames(sample_rate));

        debug!(
            "granulator: {} Hz, {} frame grains, features {:?}",
            sample_rate, grain_frames, params.features
        );

        Self {
            params,
            sample_rate,
            grain_frames,
            window,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            rng,
        }
    }

    pub fn set_params(&mut self, params: GranulatorParams) {
        self.params = params.sanitized();
        self.rebuild_window();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate > 0.0 && sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.rebuild_window();
        }
    }

    fn rebuild_window(&mut self) {
        let frames = grain_frames(self.params.grain_size_ms, self.sample_rate);
        if frames != self.grain_frames {
            debug!("granulator: grain {} -> {} frames", self.grain_frames, frames);
            self.grain_frames = frames;
            self.window.resize(frames);
        }
    }

    /// Granulate `input` into `output`.
    ///
    /// Frames of `output` beyond `input.len()` are silenced.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        output.fill(0.0);

        let frames = input.len().min(output.len());
        if frames < 2 {
            return;
        }

        let features = self.params.features;
        let grain = self.grain_frames;
        let spacing = ((self.params.grain_offset_pct / 100.0 * grain as f32) as usize).max(1);
        let jitter = if features.random_offset {
            (self.params.randomness_pct / 100.0 * grain as f32) as i64
        } else {
            0
        };
        let fixed_ratio = if features.pitch_shift {
            2.0_f32.powf(self.params.pitch_shift_semitones / 12.0)
        } else {
            1.0
        };

        let max_start = frames.saturating_sub(grain) as i64;
        let last = frames - 2;

        let mut cursor = 0;
        while cursor < frames {
            let mut start = cursor as i64;
            if jitter > 0 {
                start += self.rng.random_range(-jitter..=jitter);
            }
            let start = start.clamp(0, max_start) as f32;

            let ratio = if features.random_pitch {
                self.rng.random_range(0.5..=1.5)
            } else {
                fixed_ratio
            };
            let step = 1.0 / ratio.max(MIN_PITCH_RATIO);
            let gain = grain_gain(features, &mut self.rng);

            let len = grain.min(frames - cursor);
            for (i, out) in output[cursor..cursor + len].iter_mut().enumerate() {
                let pos = start + i as f32 * step;
                let index = (pos as usize).min(last);
                let frac = (pos - index as f32).clamp(0.0, 1.0);
                let a = input[index];
                let b = input[index + 1];
                *out += (a + (b - a) * frac) * self.window.gain(i) * gain;
            }

            cursor += spacing;
        }
    }

    pub fn params(&self) -> &GranulatorParams {
        &self.params
    }

    pub fn grain_frames(&self) -> usize {
        self.grain_frames
    }

    pub fn window(&self) -> &HannWindow {
        &self.window
    }
}

#[inline]
fn grain_gain(features: GrainFeatures, rng: &mut SmallRng) -> f32 {
    if features.stereo_bias && rng.random::<bool>() {
        0.5
    } else {
        1.0
    }
}

/// Floor for the per-grain pitch ratio before it divides the read position.
const MIN_PITCH_RATIO: f32 = 1.0e-3;

fn grain_frames(grain_ms: f32, sample_rate: f32) -> usize {
    ((grain_ms * sample_rate / 1000.0).round() as usize).max(2)
}

fn max_grain_frames(sample_rate: f32) -> usize {
    ((MAX_GRAIN_MS * sample_rate / 1000.0).ceil() as usize).max(2)
}

impl GraphNode for Granulator {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.set_sample_rate(ctx.sample_rate);

        let mut scratch = std::mem::take(&mut self.scratch);
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let input = &mut scratch[..chunk.len()];
            input.copy_from_slice(chunk);
            self.process(input, chunk);
        }
        self.scratch = scratch;
    }
}
