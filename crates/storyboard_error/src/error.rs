//! Top-level error wrapper types.

use crate::{
    ArgumentError, ConfigError, ModelsError, ParseError, PipelineError, StorageError,
};

/// Every error condition the Storyboard crates can surface.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, ConfigError};
///
/// let config_err = ConfigError::new("HF_API_TOKEN is not set");
/// let err: StoryboardError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// Malformed caller input
    #[from(ArgumentError)]
    InvalidArgument(ArgumentError),
    /// Model output could not be parsed into frames
    #[from(ParseError)]
    Parse(ParseError),
    /// Frame sequencing failed
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Text or image provider failure
    #[from(ModelsError)]
    Transport(ModelsError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardErrorKind, StoryboardResult, ArgumentError};
///
/// fn might_fail() -> StoryboardResult<()> {
///     Err(ArgumentError::new("num_frames must be at least 1"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), StoryboardErrorKind::InvalidArgument(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }

    /// Whether this error came from a provider call rather than local logic.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind(), StoryboardErrorKind::Transport(_))
    }
}

// Generic From implementation for any type that converts to StoryboardErrorKind
impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyboard operations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
