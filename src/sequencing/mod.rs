pub mod notes;
pub mod parse;
pub mod pattern;
pub mod scale;

pub use notes::{root_frequency, RootNote, RootSequence};
pub use parse::ParseError;
pub use pattern::{ArpeggioPattern, ArpeggioStyle, PatternShape};
pub use scale::{ChordScale, ScaleType};
