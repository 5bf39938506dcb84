/// Errors from parsing musical labels out of configuration text.
///
/// Engines never see these: at runtime unknown labels fall back to safe
/// defaults. They exist for callers that want to reject bad input early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of the root-note labels A-G
    UnknownNote(String),
    /// Not a known scale name
    UnknownScale(String),
    /// Not a known arpeggio style name
    UnknownStyle(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownNote(label) => {
                write!(f, "Unknown root note '{}': expected one of A, B, C, D, E, F, G", label)
            }
            ParseError::UnknownScale(name) => {
                write!(f, "Unknown scale '{}': expected major or minor", name)
            }
            ParseError::UnknownStyle(name) => {
                write!(
                    f,
                    "Unknown arpeggio style '{}': expected up, down, updown, \
                     201310, 203130, 210301, 213031 or random",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
