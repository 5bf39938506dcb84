pub mod control; // Lock-free parameter updates for the audio thread
pub mod dsp;
pub mod graph; // Block-based engines
pub mod patch; // Engine parameters and chain configuration
pub mod sequencing; // Notes, chords and arpeggio patterns

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Slowest arpeggiator step rate in steps per second.
pub const MIN_RATE_HZ: f32 = 0.01;
/// Longest delay any tap can reach.
pub const MAX_DELAY_MS: f32 = 5_000.0;
/// Largest LFO excursion added to a tap's base delay.
pub const MAX_LFO_DEPTH_MS: f32 = 100.0;
/// Longest grain the granulator reserves window storage for.
pub const MAX_GRAIN_MS: f32 = 1_000.0;
/// Most delay taps a MultiTapDelay will build.
pub const MAX_TAPS: usize = 16;
