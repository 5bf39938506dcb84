//! State sent from the audio thread to the UI
//!
//! Allocation-free and `Copy` so the audio callback can push one per buffer.

#[derive(Clone, Copy, Debug, Default)]
pub struct StatusUpdate {
    /// Stream time at the end of the last rendered buffer, in seconds
    pub time: f64,
    pub pattern_index: usize,
    pub pattern_len: usize,
    pub chord_index: usize,
    pub root_hz: f32,
    /// Frequency the arpeggiator is sounding (mid-glide values included)
    pub frequency_hz: f32,
    pub arpeggiator_on: bool,
    pub granulator_on: bool,
    pub tap_delay_on: bool,
}
