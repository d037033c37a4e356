//! Error types for the Storyboard workspace.
//!
//! This crate provides the foundation error types used throughout the Storyboard crates.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{ArgumentError, StoryboardResult};
//!
//! fn frame_count(n: u32) -> StoryboardResult<u32> {
//!     if n == 0 {
//!         Err(ArgumentError::new("num_frames must be at least 1"))?
//!     }
//!     Ok(n)
//! }
//!
//! assert!(frame_count(0).is_err());
//! assert_eq!(frame_count(3).unwrap(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod argument;
mod config;
mod error;
mod models;
mod parse;
mod pipeline;
mod storage;

pub use argument::ArgumentError;
pub use config::ConfigError;
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use parse::{ParseError, ParseErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use storage::{StorageError, StorageErrorKind};
