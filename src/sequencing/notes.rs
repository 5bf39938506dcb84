/*
Root Note Table
===============

The arpeggiator builds every chord on one of seven natural root notes, taken
from the octave below middle C up to G3:

    label   frequency (Hz)
    A       220.00          A3, the reference (A4 = 440 Hz, one octave down)
    B       246.94
    C       261.63          middle C
    D       293.66
    E       329.63
    F       349.23
    G       392.00

The table is a compile-time constant: it never changes, so it needs no
synchronisation and can be read from the audio thread.

Labels arrive as text from configuration. Unknown labels are not an error at
runtime: they fall back to A (220 Hz) so a typo produces a sound, not
silence. Use `str::parse::<RootNote>()` when you want strict validation.

Example usage:
  RootNote::from_label("C").frequency()      // 261.63
  root_frequency("Z")                        // 220.0 (fallback)
  RootSequence::from_labels(&["A", "F", "C", "G"])
*/

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::parse::ParseError;

/// Frequencies of A..G in Hz, indexed by `RootNote as usize`.
pub const ROOT_FREQUENCIES: [f32; 7] = [220.0, 246.94, 261.63, 293.66, 329.63, 349.23, 392.00];

/// Frequency used for unknown labels and empty sequences.
pub const DEFAULT_ROOT_FREQUENCY: f32 = ROOT_FREQUENCIES[0];

/// Most root notes a chord progression can hold.
pub const MAX_ROOT_NOTES: usize = 16;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootNote {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl RootNote {
    pub const ALL: [RootNote; 7] = [
        RootNote::A,
        RootNote::B,
        RootNote::C,
        RootNote::D,
        RootNote::E,
        RootNote::F,
        RootNote::G,
    ];

    #[inline]
    pub fn frequency(self) -> f32 {
        ROOT_FREQUENCIES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            RootNote::A => "A",
            RootNote::B => "B",
            RootNote::C => "C",
            RootNote::D => "D",
            RootNote::E => "E",
            RootNote::F => "F",
            RootNote::G => "G",
        }
    }

    /// Lenient lookup: anything that is not A-G maps to A.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    /// Next natural note, wrapping G back to A.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }
}

impl FromStr for RootNote {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|note| note.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::UnknownNote(s.to_string()))
    }
}

impl std::fmt::Display for RootNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Frequency for a root-note label, 220 Hz when the label is unknown.
pub fn root_frequency(label: &str) -> f32 {
    RootNote::from_label(label).frequency()
}

/// Ordered chord progression of root notes, stored inline.
///
/// Fixed capacity keeps it `Copy`, so a whole progression can be handed to
/// the audio thread without allocating. Lookups wrap modulo the length and an
/// empty sequence reads as A.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RootSequence {
    notes: [RootNote; MAX_ROOT_NOTES],
    len: usize,
}

impl RootSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from notes, keeping at most `MAX_ROOT_NOTES`.
    pub fn from_notes(notes: &[RootNote]) -> Self {
        let mut sequence = Self::new();
        for &note in notes.iter().take(MAX_ROOT_NOTES) {
            sequence.push(note);
        }
        sequence
    }

    /// Build from text labels; unknown labels become A.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut sequence = Self::new();
        for label in labels.iter().take(MAX_ROOT_NOTES) {
            sequence.push(RootNote::from_label(label.as_ref()));
        }
        sequence
    }

    /// Append a note. Returns false when the sequence is full.
    pub fn push(&mut self, note: RootNote) -> bool {
        if self.len == MAX_ROOT_NOTES {
            return false;
        }
        self.notes[self.len] = note;
        self.len += 1;
        true
    }

    /// Note at `index`, wrapping; A for an empty sequence.
    #[inline]
    pub fn get(&self, index: usize) -> RootNote {
        if self.len == 0 {
            RootNote::default()
        } else {
            self.notes[index % self.len]
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[RootNote] {
        &self.notes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_is_220() {
        assert_eq!(root_frequency("A"), 220.0);
    }

    #[test]
    fn unknown_label_defaults_to_a() {
        assert_eq!(root_frequency("Z"), 220.0);
        assert_eq!(root_frequency(""), 220.0);
        assert_eq!(root_frequency("C#"), 220.0);
    }

    #[test]
    fn table_lookups() {
        assert_eq!(root_frequency("C"), 261.63);
        assert_eq!(root_frequency("g"), 392.00);
        assert_eq!(root_frequency(" E "), 329.63);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!("D".parse::<RootNote>(), Ok(RootNote::D));
        assert_eq!(
            "H".parse::<RootNote>(),
            Err(ParseError::UnknownNote("H".to_string()))
        );
    }

    #[test]
    fn frequencies_ascend() {
        for pair in ROOT_FREQUENCIES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn sequence_wraps_and_defaults() {
        let empty = RootSequence::new();
        assert_eq!(empty.get(3), RootNote::A);

        let progression = RootSequence::from_labels(&["C", "Q", "G"]);
        assert_eq!(progression.as_slice(), &[RootNote::C, RootNote::A, RootNote::G]);
        assert_eq!(progression.get(4), RootNote::A);
        assert_eq!(progression.get(5), RootNote::G);
    }

    #[test]
    fn sequence_is_capped() {
        let labels = vec!["B"; MAX_ROOT_NOTES + 4];
        let sequence = RootSequence::from_labels(&labels);
        assert_eq!(sequence.len(), MAX_ROOT_NOTES);

        let mut full = sequence;
        assert!(!full.push(RootNote::C));
    }
}
