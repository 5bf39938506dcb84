use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::notes::RootNote;
use super::parse::ParseError;

/// Chord quality used to pick the arpeggio intervals.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleType {
    #[default]
    Major,
    Minor,
}

impl ScaleType {
    /// Semitone offsets of the four chord tones: root, third, fifth, octave.
    pub const fn intervals(self) -> [i32; 4] {
        match self {
            ScaleType::Major => [0, 4, 7, 12],
            ScaleType::Minor => [0, 3, 7, 12],
        }
    }

    /// Host-style integer selector: 0 is Major, anything else Minor.
    pub fn from_index(index: i32) -> Self {
        if index == 0 {
            ScaleType::Major
        } else {
            ScaleType::Minor
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ScaleType::Major => ScaleType::Minor,
            ScaleType::Minor => ScaleType::Major,
        }
    }
}

impl FromStr for ScaleType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(ScaleType::Major),
            "minor" | "min" => Ok(ScaleType::Minor),
            _ => Err(ParseError::UnknownScale(s.to_string())),
        }
    }
}

/// A chord on a concrete root: the base frequency plus its four intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordScale {
    pub root_frequency_hz: f32,
    pub intervals: [i32; 4],
}

impl ChordScale {
    pub fn new(scale: ScaleType, root: RootNote) -> Self {
        Self {
            root_frequency_hz: root.frequency(),
            intervals: scale.intervals(),
        }
    }

    /// Look up by text label; unknown labels use A.
    pub fn lookup(scale: ScaleType, label: &str) -> Self {
        Self::new(scale, RootNote::from_label(label))
    }

    /// Equal-tempered frequency `semitones` above the root.
    #[inline]
    pub fn frequency_at(&self, semitones: i32) -> f32 {
        self.root_frequency_hz * 2.0_f32.powf(semitones as f32 / 12.0)
    }
}
