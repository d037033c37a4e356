//! Invalid caller input.

/// Malformed caller input, rejected before any network call is made.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invalid Argument: {} at line {} in {}", message, line, file)]
pub struct ArgumentError {
    /// What was wrong with the input
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ArgumentError {
    /// Create a new ArgumentError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::ArgumentError;
    ///
    /// let err = ArgumentError::new("num_frames must be at least 1");
    /// assert!(err.message.contains("num_frames"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
