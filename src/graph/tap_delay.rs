use log::debug;

use crate::{
    dsp::{FractionalDelayLine, Lfo},
    graph::node::{GraphNode, RenderCtx},
    patch::{unit_gain, TapDelayParams},
    MAX_DELAY_MS,
};

/*
Multi-Tap Delay
===============

A bank of delay lines ("taps") whose delay times are spread evenly across
five seconds. With T taps, tap k (0-based) sits at:

    base_k = 5000 ms × (k + 1) / T

    T = 4:   1250 ms   2500 ms   3750 ms   5000 ms

Serial feedback cascade
-----------------------
Taps run in order every frame, and each tap is fed the input plus feedback
from everything the earlier taps produced on this same frame:

    wet = 0
    for each tap k:
        tap_k.write(input + feedback × wet)
        wet += tap_k.read()
    out = dry × input + wet_gain × wet

So the first tap only ever hears the dry input, while later taps also hear
echoes of the taps before them. The result is a thickening cloud of repeats
rather than the evenly decaying train of a single feedback loop.

Modulation
----------
With `modulated` set, each tap owns an LFO that sweeps its delay time:

    delay_k = base_k + depth × sin(2π · phase_k)

The LFOs start a fraction k / T of a cycle apart so the taps do not move in
lockstep. Every delay is clamped to [0, 5000] ms, so the last tap only ever
swings shorter.

Gains are clamped to [0, 1]; LFO rate to [0, 20] Hz; depth to [0, 100] ms.
Changing the tap count or sample rate reallocates the bank.
*/

/// One delay line in the bank plus its own modulation LFO.
pub struct DelayTap {
    line: FractionalDelayLine,
    base_delay_ms: f32,
    lfo: Lfo,
}

impl DelayTap {
    pub fn new(
        sample_rate: f32,
        base_delay_ms: f32,
        lfo_frequency_hz: f32,
        lfo_phase: f32,
    ) -> Self {
        let mut line = FractionalDelayLine::new(sample_rate, MAX_DELAY_MS);
        line.set_delay_ms(base_delay_ms);

        Self {
            line,
            base_delay_ms: line_delay(base_delay_ms),
            lfo: Lfo::with_phase(lfo_frequency_hz, lfo_phase),
        }
    }

    /// Push one sample through the tap at its base delay.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.line.next_sample(input)
    }

    /// Push one sample through the tap with its delay swept by `depth_ms`.
    #[inline]
    pub fn process_modulated(&mut self, input: f32, depth_ms: f32, sample_rate: f32) -> f32 {
        let offset = depth_ms * self.lfo.next_value(sample_rate);
        self.line.set_delay_ms(self.base_delay_ms + offset);
        self.line.next_sample(input)
    }

    pub fn base_delay_ms(&self) -> f32 {
        self.base_delay_ms
    }

    /// Delay used for the most recent sample.
    pub fn delay_ms(&self) -> f32 {
        self.line.delay_ms()
    }

    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    fn set_lfo_frequency(&mut self, frequency: f32) {
        self.lfo.set_frequency(frequency);
    }

    fn settle(&mut self) {
        self.line.set_delay_ms(self.base_delay_ms);
    }

    fn reset(&mut self) {
        self.line.reset();
        self.settle();
    }
}

fn line_delay(ms: f32) -> f32 {
    if ms.is_nan() {
        0.0
    } else {
        ms.clamp(0.0, MAX_DELAY_MS)
    }
}

/// Base delay of tap `index` in a bank of `count`.
pub fn tap_base_delay_ms(index: usize, count: usize) -> f32 {
    MAX_DELAY_MS * (index + 1) as f32 / count.max(1) as f32
}

pub struct MultiTapDelay {
    params: TapDelayParams,
    sample_rate: f32,
    taps: Vec<DelayTap>,
}

impl MultiTapDelay {
    pub fn new(sample_rate: f32, params: TapDelayParams) -> Self {
        let params = params.sanitized();
        let taps = build_taps(sample_rate, &params);

        Self {
            params,
            sample_rate,
            taps,
        }
    }

    pub fn set_params(&mut self, params: TapDelayParams) {
        let params = params.sanitized();
        let was_modulating = self.params.is_modulating();
        let rebuild = params.tap_count != self.params.tap_count;
        self.params = params;

        if rebuild {
            self.taps = build_taps(self.sample_rate, &self.params);
            return;
        }

        for tap in &mut self.taps {
            tap.set_lfo_frequency(self.params.lfo_frequency_hz);
        }
        if was_modulating && !self.params.is_modulating() {
            self.taps.iter_mut().for_each(DelayTap::settle);
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate > 0.0 && sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.taps = build_taps(sample_rate, &self.params);
        }
    }

    /// Delay `input` into `output`. Frames of `output` beyond `input.len()`
    /// are silenced.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        let frames = input.len().min(output.len());
        let gains = Gains::from(&self.params);

        for (out, &sample) in output[..frames].iter_mut().zip(input) {
            *out = self.tick(sample, gains);
        }
        output[frames..].fill(0.0);
    }

    #[inline]
    fn tick(&mut self, input: f32, gains: Gains) -> f32 {
        let mut wet = 0.0;

        if let Some(depth_ms) = gains.depth_ms {
            for tap in &mut self.taps {
                let feed = input + gains.feedback * wet;
                wet += tap.process_modulated(feed, depth_ms, self.sample_rate);
            }
        } else {
            for tap in &mut self.taps {
                wet += tap.process(input + gains.feedback * wet);
            }
        }

        gains.dry * input + gains.wet * wet
    }

    pub fn params(&self) -> &TapDelayParams {
        &self.params
    }

    pub fn taps(&self) -> &[DelayTap] {
        &self.taps
    }
}

#[derive(Clone, Copy)]
struct Gains {
    dry: f32,
    wet: f32,
    feedback: f32,
    depth_ms: Option<f32>,
}

impl From<&TapDelayParams> for Gains {
    fn from(params: &TapDelayParams) -> Self {
        Self {
            dry: unit_gain(params.dry),
            wet: unit_gain(params.wet),
            feedback: unit_gain(params.feedback),
            depth_ms: params.is_modulating().then_some(params.lfo_depth_ms),
        }
    }
}

fn build_taps(sample_rate: f32, params: &TapDelayParams) -> Vec<DelayTap> {
    let count = params.tap_count;
    debug!(
        "tap delay: building {} tap(s) at {} Hz, modulated: {}",
        count,
        sample_rate,
        params.is_modulating()
    );

    (0..count)
        .map(|k| {
            DelayTap::new(
                sample_rate,
                tap_base_delay_ms(k, count),
                params.lfo_frequency_hz,
                k as f32 / count as f32,
            )
        })
        .collect()
}

impl GraphNode for MultiTapDelay {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.set_sample_rate(ctx.sample_rate);

        let gains = Gains::from(&self.params);
        for sample in out.iter_mut() {
            *sample = self.tick(*sample, gains);
        }
    }

    fn reset(&mut self) {
        self.taps.iter_mut().for_each(DelayTap::reset);
    }
}
