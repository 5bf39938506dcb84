// Parameter updates travelling from a UI/control thread to the audio thread.
//
// Messages are plain `Copy` values so pushing one through a ring buffer never
// allocates. The audio side drains them at the top of each block.

use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{
    graph::chain::Stage,
    patch::{ArpeggiatorParams, GranulatorParams, TapDelayParams},
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    Arpeggiator(ArpeggiatorParams),
    Granulator(GranulatorParams),
    TapDelay(TapDelayParams),
    Bypass { stage: Stage, bypassed: bool },
    /// Clear all streaming state (delay buffers, sequencer position)
    Reset,
}

pub trait ControlReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Queue-backed receiver for offline rendering and tests.
impl ControlReceiver for VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}
