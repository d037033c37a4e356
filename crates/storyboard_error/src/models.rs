//! Model provider errors.
//!
//! Every failure talking to the text or image service is a transport error:
//! it is never retried here and propagates to the caller unchanged.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// The request never produced a response (DNS, TLS, connection reset)
    #[display("{provider}: request failed: {message}")]
    Http {
        /// Provider name
        provider: &'static str,
        /// Underlying transport message
        message: String,
    },
    /// The request exceeded the configured per-call timeout
    #[display("{provider}: request timed out after {seconds}s")]
    Timeout {
        /// Provider name
        provider: &'static str,
        /// Configured timeout in seconds
        seconds: u64,
    },
    /// Credentials were rejected (401/403)
    #[display("{provider}: authentication failed ({status})")]
    Unauthorized {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
    },
    /// The provider throttled the request (429)
    #[display("{provider}: rate limit exceeded: {message}")]
    RateLimited {
        /// Provider name
        provider: &'static str,
        /// Response body
        message: String,
    },
    /// Any other non-success status
    #[display("{provider}: API error {status}: {message}")]
    Api {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The provider answered successfully but with nothing usable
    #[display("{provider}: empty response")]
    EmptyResponse {
        /// Provider name
        provider: &'static str,
    },
    /// The response body did not have the expected shape
    #[display("Response conversion failed: {}", _0)]
    ResponseConversion(String),
    /// Driver could not be built from the given configuration
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),
    /// Builder error (derive_builder failures)
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl ModelsErrorKind {
    /// Classify a non-success HTTP status.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::ModelsErrorKind;
    ///
    /// let kind = ModelsErrorKind::from_status("huggingface", 429, "slow down".into());
    /// assert!(matches!(kind, ModelsErrorKind::RateLimited { .. }));
    /// ```
    pub fn from_status(provider: &'static str, status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { provider, status },
            429 => Self::RateLimited { provider, message },
            _ => Self::Api {
                provider,
                status,
                message,
            },
        }
    }
}

/// Model provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
