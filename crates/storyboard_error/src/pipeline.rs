//! Pipeline error types.

/// Specific error conditions raised while sequencing the two model calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The initial generation produced zero frames
    #[display("No frames were generated for the prompt")]
    NoFramesGenerated,
    /// The initial generation skipped frame numbers
    #[display("Generated frames are not contiguous: missing frame(s) {:?}", missing)]
    NonContiguousFrames {
        /// Frame numbers absent from the 1..=max range
        missing: Vec<u32>,
    },
    /// The refinement pass did not restate the same frames
    #[display("Refinement returned {actual} frame(s), expected {expected}")]
    RefinementMismatch {
        /// Frame count of the initial pass
        expected: usize,
        /// Frame count of the refinement pass
        actual: usize,
    },
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use storyboard_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::NoFramesGenerated);
/// assert!(format!("{}", err).contains("No frames"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
