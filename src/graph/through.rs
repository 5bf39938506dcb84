use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (effect):

  Through: [Source] ──→ [Effect] ──→ output

1. Render the source into the output buffer
2. Pass that buffer through the effect (in-place processing)

`EngineChain` is the fixed three-stage version with bypass switches; Through
is for ad-hoc pairings:

     let grains = Arpeggiator::seeded(48_000.0, arp_params, 1)
         .through(Granulator::seeded(48_000.0, grain_params, 2));

     let echoes = grains.through(MultiTapDelay::new(48_000.0, delay_params));
*/

pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn effect(&self) -> &F {
        &self.effect
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn reset(&mut self) {
        self.source.reset();
        self.effect.reset();
    }
}
