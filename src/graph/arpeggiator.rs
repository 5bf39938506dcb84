use log::{debug, warn};
use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    dsp::{GlideRamp, PhaseOscillator},
    graph::node::{GraphNode, RenderCtx},
    patch::ArpeggiatorParams,
    sequencing::{ArpeggioPattern, ChordScale},
    MIN_RATE_HZ,
};

/*
Arpeggiator
===========

A self-playing sine voice that walks through the notes of a chord, one step
every `1 / rate` seconds, and moves on to the next chord of a progression
after a set number of passes.

    rate = 4 steps/s, A major, style Up, progression [A, F], repeat 2

      time →  0    .25  .5   .75  1.0  1.25 1.5  1.75 2.0
      note    A    C#   E    A'   A    C#   E    A'   F   ...
              └──── pass 1 ───┘  └──── pass 2 ───┘   next chord

Per frame:

  1. elapsed += 1 / sample_rate
  2. target = root · 2^(offset / 12)   (offset = current pattern step)
  3. glide the sounding frequency linearly toward target
  4. emit sin(2π · phase), then advance the phase
  5. if elapsed ≥ interval: elapsed −= interval, move to the next step;
     after the last step count a pass, and after `chord_repeat` passes
     switch root note and rebuild the pattern

Timing
------
`elapsed` is reduced by the interval rather than zeroed, so step lengths
average out exactly even when the interval is not a whole number of frames.
The rate is clamped so at most one step happens per frame.

Glide
-----
The sounding frequency starts at 0 Hz, so the very first note sweeps up from
silence over the glide time. Each new step re-aims the ramp from wherever it
currently is; with a glide of 0 ms the pitch jumps.

Rate and glide are read at the start of every block. Scale, style and the
progression rebuild the chord and pattern when they change.

Example usage:

  let params = ArpeggiatorParams {
      rate_hz: 8.0,
      root_notes: RootSequence::from_labels(&["A", "F", "C", "G"]),
      shape: PatternShape::new(ArpeggioStyle::UpDown),
      ..ArpeggiatorParams::default()
  };
  let mut arp = Arpeggiator::seeded(48_000.0, params, 7);
  arp.render(&mut block);
*/

/// Position of the sequencer within the pattern and progression.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SequencerState {
    pub pattern_index: usize,
    pub chord_index: usize,
    pub repeat_counter: u32,
    /// Seconds since the last step, always below one interval after a frame
    pub elapsed: f32,
}

pub struct Arpeggiator {
    params: ArpeggiatorParams,
    sample_rate: f32,
    chord: ChordScale,
    pattern: ArpeggioPattern,
    state: SequencerState,
    target_hz: f32,
    glide: GlideRamp,
    osc: PhaseOscillator,
    rng: SmallRng,
}

impl Arpeggiator {
    pub fn new(sample_rate: f32, params: ArpeggiatorParams) -> Self {
        Self::with_rng(sample_rate, params, SmallRng::from_os_rng())
    }

    /// Deterministic construction for tests and reproducible renders.
    pub fn seeded(sample_rate: f32, params: ArpeggiatorParams, seed: u64) -> Self {
        Self::with_rng(sample_rate, params, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(sample_rate: f32, params: ArpeggiatorParams, mut rng: SmallRng) -> Self {
        let params = checked(params);
        let chord = ChordScale::new(params.scale, params.root_notes.get(0));
        let pattern = ArpeggioPattern::build(&chord, params.shape, &mut rng);

        debug!(
            "arpeggiator: {} Hz, {} root(s), {:?}/{:?}, {} steps",
            sample_rate,
            params.root_notes.len(),
            params.scale,
            params.shape.style,
            pattern.len()
        );

        let mut arp = Self {
            params,
            sample_rate,
            chord,
            pattern,
            state: SequencerState::default(),
            target_hz: 0.0,
            glide: GlideRamp::new(0.0),
            osc: PhaseOscillator::new(),
            rng,
        };
        arp.update_target();
        arp
    }

    /// Apply new parameters. Scale, style or progression changes rebuild
    /// the pattern; rate and glide take effect on the next block.
    pub fn set_params(&mut self, params: ArpeggiatorParams) {
        let params = checked(params);
        let structural = params.scale != self.params.scale
            || params.shape != self.params.shape
            || params.root_notes != self.params.root_notes;
        self.params = params;

        if structural {
            self.state.chord_index %= self.params.root_notes.len().max(1);
            self.rebuild_pattern();
            debug!(
                "arpeggiator: rebuilt {:?}/{:?} pattern, {} steps",
                self.params.scale,
                self.params.shape.style,
                self.pattern.len()
            );
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate > 0.0 && sample_rate != self.sample_rate {
            debug!("arpeggiator: sample rate {} -> {}", self.sample_rate, sample_rate);
            self.sample_rate = sample_rate;
        }
    }

    /// Render one block of the arpeggio into `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        let sample_rate = self.sample_rate;
        let dt = 1.0 / sample_rate;
        let rate = self.params.rate_hz.clamp(MIN_RATE_HZ, sample_rate);
        let interval = (1.0 / rate).max(dt);
        let glide_ms = self.params.glide_ms;

        for sample in out.iter_mut() {
            self.state.elapsed += dt;

            let frequency = self.glide.step(self.target_hz, glide_ms, sample_rate);
            *sample = self.osc.next_sample(frequency, sample_rate);

            if self.state.elapsed >= interval {
                self.state.elapsed -= interval;
                self.advance_step();
            }
        }
    }

    fn advance_step(&mut self) {
        self.state.pattern_index = (self.state.pattern_index + 1) % self.pattern.len().max(1);

        if self.state.pattern_index == 0 {
            self.state.repeat_counter += 1;
            if self.state.repeat_counter >= self.params.chord_repeat {
                self.state.repeat_counter = 0;
                self.state.chord_index =
                    (self.state.chord_index + 1) % self.params.root_notes.len().max(1);
                self.rebuild_pattern();
            }
        }

        self.update_target();
    }

    fn rebuild_pattern(&mut self) {
        let root = self.params.root_notes.get(self.state.chord_index);
        self.chord = ChordScale::new(self.params.scale, root);
        self.pattern = ArpeggioPattern::build(&self.chord, self.params.shape, &mut self.rng);
        self.state.pattern_index %= self.pattern.len().max(1);
        self.update_target();
    }

    #[inline]
    fn update_target(&mut self) {
        self.target_hz = self.chord.frequency_at(self.pattern.step(self.state.pattern_index));
    }

    pub fn params(&self) -> &ArpeggiatorParams {
        &self.params
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn pattern(&self) -> &ArpeggioPattern {
        &self.pattern
    }

    pub fn chord(&self) -> &ChordScale {
        &self.chord
    }

    /// Frequency the oscillator is sounding right now.
    pub fn frequency(&self) -> f32 {
        self.glide.current()
    }

    /// Frequency of the current pattern step.
    pub fn target_frequency(&self) -> f32 {
        self.target_hz
    }

    pub fn phase(&self) -> f32 {
        self.osc.phase()
    }
}

fn checked(params: ArpeggiatorParams) -> ArpeggiatorParams {
    if params.root_notes.is_empty() {
        warn!("arpeggiator: empty root-note sequence, playing A");
    }
    if !(params.rate_hz >= MIN_RATE_HZ) {
        warn!("arpeggiator: rate {} too low, using {}", params.rate_hz, MIN_RATE_HZ);
    }
    params.sanitized()
}

impl GraphNode for Arpeggiator {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.set_sample_rate(ctx.sample_rate);
        self.render(out);
    }

    fn reset(&mut self) {
        self.state = SequencerState::default();
        self.glide = GlideRamp::new(0.0);
        self.osc.reset();
        self.rebuild_pattern();
    }
}
