/*
Arpeggio Patterns
=================

An arpeggio plays the notes of a chord one after another instead of all at
once. The chord gives four tones (root, third, fifth, octave) as semitone
offsets; a *style* decides the order they are visited in.

Styles are index tables into the chord's four intervals:

    Up        0 1 2 3           root → octave
    Down      3 2 1 0           octave → root
    UpDown    0 1 2 3 2 1       up, then back down without repeating the ends
    201310    2 0 1 3 1 0       fixed permutations ("fifth first" figures)
    203130    2 0 3 1 3 0
    210301    2 1 0 3 0 1
    213031    2 1 3 0 3 1
    Random    0 1 2 3           then shuffled with the engine's RNG

For A major (intervals 0, 4, 7, 12):

    Up      → [0, 4, 7, 12]
    Down    → [12, 7, 4, 0]
    UpDown  → [0, 4, 7, 12, 7, 4]

Shape options
-------------

  mirror      Append the styled run's interior in reverse, turning a one-way
              run into a there-and-back figure:
                  [0, 4, 7, 12] → [0, 4, 7, 12, 7, 4]

  low_octave  Prefix a step one octave below the root (-12):
                  [0, 4, 7, 12] → [-12, 0, 4, 7, 12]

When the style is Random the whole finished pattern (including any prefix or
mirrored tail) is shuffled.

Patterns are stored inline with a fixed capacity, so rebuilding one when the
chord changes mid-stream never touches the heap.
*/

use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::parse::ParseError;
use super::scale::ChordScale;

/// Upper bound on steps in any built pattern.
pub const MAX_PATTERN_LEN: usize = 16;

/// Semitone offset of the optional low-octave step.
pub const LOW_OCTAVE_OFFSET: i32 = -12;

/// Order in which the chord tones are visited.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArpeggioStyle {
    #[default]
    Up,
    Down,
    UpDown,
    Style201310,
    Style203130,
    Style210301,
    Style213031,
    Random,
}

impl ArpeggioStyle {
    pub const ALL: [ArpeggioStyle; 8] = [
        ArpeggioStyle::Up,
        ArpeggioStyle::Down,
        ArpeggioStyle::UpDown,
        ArpeggioStyle::Style201310,
        ArpeggioStyle::Style203130,
        ArpeggioStyle::Style210301,
        ArpeggioStyle::Style213031,
        ArpeggioStyle::Random,
    ];

    /// Indices into the chord intervals, taken modulo 4 by the builder.
    pub const fn indices(self) -> &'static [usize] {
        match self {
            ArpeggioStyle::Up | ArpeggioStyle::Random => &[0, 1, 2, 3],
            ArpeggioStyle::Down => &[3, 2, 1, 0],
            ArpeggioStyle::UpDown => &[0, 1, 2, 3, 2, 1],
            ArpeggioStyle::Style201310 => &[2, 0, 1, 3, 1, 0],
            ArpeggioStyle::Style203130 => &[2, 0, 3, 1, 3, 0],
            ArpeggioStyle::Style210301 => &[2, 1, 0, 3, 0, 1],
            ArpeggioStyle::Style213031 => &[2, 1, 3, 0, 3, 1],
        }
    }

    /// Host-style integer selector; out-of-range values fall back to Up.
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ArpeggioStyle::Up => "up",
            ArpeggioStyle::Down => "down",
            ArpeggioStyle::UpDown => "updown",
            ArpeggioStyle::Style201310 => "201310",
            ArpeggioStyle::Style203130 => "203130",
            ArpeggioStyle::Style210301 => "210301",
            ArpeggioStyle::Style213031 => "213031",
            ArpeggioStyle::Random => "random",
        }
    }
}

impl FromStr for ArpeggioStyle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| ParseError::UnknownStyle(s.to_string()))
    }
}

/// Style plus the optional mirror / low-octave decorations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternShape {
    pub style: ArpeggioStyle,
    pub low_octave: bool,
    pub mirror: bool,
}

impl PatternShape {
    pub fn new(style: ArpeggioStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn with_low_octave(mut self, enabled: bool) -> Self {
        self.low_octave = enabled;
        self
    }

    pub fn with_mirror(mut self, enabled: bool) -> Self {
        self.mirror = enabled;
        self
    }
}

/// Ordered semitone offsets for one pass through the arpeggio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpeggioPattern {
    steps: [i32; MAX_PATTERN_LEN],
    len: usize,
}

impl ArpeggioPattern {
    /// Build the pattern for `chord` in the given shape.
    ///
    /// `rng` is only consumed by the Random style.
    pub fn build<R: Rng>(chord: &ChordScale, shape: PatternShape, rng: &mut R) -> Self {
        let mut pattern = Self {
            steps: [0; MAX_PATTERN_LEN],
            len: 0,
        };

        if shape.low_octave {
            pattern.push(LOW_OCTAVE_OFFSET);
        }

        let run_start = pattern.len;
        for &index in shape.style.indices() {
            pattern.push(chord.intervals[index % chord.intervals.len()]);
        }
        let run_end = pattern.len;

        if shape.mirror && run_end - run_start > 2 {
            for i in (run_start + 1..run_end - 1).rev() {
                pattern.push(pattern.steps[i]);
            }
        }

        if shape.style == ArpeggioStyle::Random {
            // Fisher-Yates
            for i in (1..pattern.len).rev() {
                let j = rng.random_range(0..=i);
                pattern.steps.swap(i, j);
            }
        }

        pattern
    }

    fn push(&mut self, step: i32) {
        if self.len < MAX_PATTERN_LEN {
            self.steps[self.len] = step;
            self.len += 1;
        }
    }

    /// Offset at `index`, wrapping modulo the pattern length.
    #[inline]
    pub fn step(&self, index: usize) -> i32 {
        if self.len == 0 {
            0
        } else {
            self.steps[index % self.len]
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.steps[..self.len]
    }
}
