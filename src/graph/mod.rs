//! Block-based audio engines built on the `dsp` primitives.
//!
//! Every engine implements [`node::GraphNode`]: the host hands it one block
//! at a time and it continues its phase, envelope and buffer state from the
//! previous call. Engines allocate only when constructed or structurally
//! reconfigured, never while rendering.

/// Glided sine voice stepping through chord arpeggios.
pub mod arpeggiator;
/// The three engines in series, with bypass and control-message handling.
pub mod chain;
/// Fluent combinators (`.through()`).
pub mod extensions;
/// Overlap-add grain engine with optional pitch and randomisation.
pub mod granular;
/// Core trait shared by all engines.
pub mod node;
/// Evenly spaced delay taps in a serial feedback cascade.
pub mod tap_delay;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use arpeggiator::Arpeggiator;
pub use chain::{EngineChain, Stage};
pub use granular::Granulator;
pub use node::{GraphNode, RenderCtx};
pub use tap_delay::MultiTapDelay;
