//! Response parsing error types.

/// Specific error conditions for parsing model output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// The text contained no recognizable `Frame N:` markers
    #[display("No frame markers found in model output ({} bytes)", _0)]
    EmptyResult(usize),
    /// The frame marker pattern failed to compile
    #[display("Invalid frame marker pattern: {}", _0)]
    Pattern(String),
}

/// Error type for response parsing.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::EmptyResult(0));
/// assert!(format!("{}", err).contains("No frame markers"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The specific error condition
    pub kind: ParseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
