use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    control::{ControlMessage, ControlReceiver},
    graph::{
        arpeggiator::Arpeggiator,
        granular::Granulator,
        node::{GraphNode, RenderCtx},
        tap_delay::MultiTapDelay,
    },
    patch::{EnginePatch, StageBypass},
};

/*
Engine Chain
============

The three engines wired in series:

    [Arpeggiator] ──→ [Granulator] ──→ [MultiTapDelay] ──→ out

The arpeggiator is a source and overwrites the block; the other two process
it in place. Any stage can be bypassed:

  - arpeggiator bypassed: the block that came in (e.g. a live input) is what
    the granulator sees
  - granulator / tap delay bypassed: the block passes that stage untouched

Bypassed stages keep their state frozen and resume where they left off.

Control messages are drained before rendering, so an update pushed from the
UI thread lands on a block boundary.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Arpeggiator,
    Granulator,
    TapDelay,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Arpeggiator, Stage::Granulator, Stage::TapDelay];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Arpeggiator => "arpeggiator",
            Stage::Granulator => "granulator",
            Stage::TapDelay => "tap delay",
        }
    }
}

pub struct EngineChain {
    arpeggiator: Arpeggiator,
    granulator: Granulator,
    tap_delay: MultiTapDelay,
    bypass: StageBypass,
}

impl EngineChain {
    pub fn new(arpeggiator: Arpeggiator, granulator: Granulator, tap_delay: MultiTapDelay) -> Self {
        Self {
            arpeggiator,
            granulator,
            tap_delay,
            bypass: StageBypass::default(),
        }
    }

    pub fn from_patch(patch: &EnginePatch, sample_rate: f32) -> Self {
        let (arpeggiator, granulator) = match patch.seed {
            Some(seed) => (
                Arpeggiator::seeded(sample_rate, patch.arpeggiator, seed),
                Granulator::seeded(sample_rate, patch.granulator, seed.wrapping_add(1)),
            ),
            None => (
                Arpeggiator::new(sample_rate, patch.arpeggiator),
                Granulator::new(sample_rate, patch.granulator),
            ),
        };
        let tap_delay = MultiTapDelay::new(sample_rate, patch.tap_delay);

        let mut chain = Self::new(arpeggiator, granulator, tap_delay);
        chain.bypass = patch.bypass;
        chain
    }

    pub fn with_bypass(mut self, bypass: StageBypass) -> Self {
        self.bypass = bypass;
        self
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Arpeggiator(params) => self.arpeggiator.set_params(params),
            ControlMessage::Granulator(params) => self.granulator.set_params(params),
            ControlMessage::TapDelay(params) => self.tap_delay.set_params(params),
            ControlMessage::Bypass { stage, bypassed } => self.set_bypass(stage, bypassed),
            ControlMessage::Reset => self.reset(),
        }
    }

    /// Apply every pending message. Returns how many were applied.
    pub fn drain<R: ControlReceiver + ?Sized>(&mut self, receiver: &mut R) -> usize {
        let mut applied = 0;
        while let Some(message) = receiver.pop() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    pub fn set_bypass(&mut self, stage: Stage, bypassed: bool) {
        if self.bypass.get(stage) != bypassed {
            debug!("chain: {} {}", stage.name(), if bypassed { "bypassed" } else { "enabled" });
            self.bypass.set(stage, bypassed);
        }
    }

    pub fn is_bypassed(&self, stage: Stage) -> bool {
        self.bypass.get(stage)
    }

    pub fn bypass(&self) -> StageBypass {
        self.bypass
    }

    pub fn arpeggiator(&self) -> &Arpeggiator {
        &self.arpeggiator
    }

    pub fn granulator(&self) -> &Granulator {
        &self.granulator
    }

    pub fn tap_delay(&self) -> &MultiTapDelay {
        &self.tap_delay
    }

    /// Snapshot of the current parameters of every stage.
    pub fn patch(&self) -> EnginePatch {
        EnginePatch {
            arpeggiator: *self.arpeggiator.params(),
            granulator: *self.granulator.params(),
            tap_delay: *self.tap_delay.params(),
            bypass: self.bypass,
            seed: None,
        }
    }
}

impl GraphNode for EngineChain {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if !self.bypass.arpeggiator {
            self.arpeggiator.render_block(out, ctx);
        }
        if !self.bypass.granulator {
            self.granulator.render_block(out, ctx);
        }
        if !self.bypass.tap_delay {
            self.tap_delay.render_block(out, ctx);
        }
    }

    fn reset(&mut self) {
        self.arpeggiator.reset();
        self.granulator.reset();
        self.tap_delay.reset();
    }
}
