//! Storyboard - turn a text prompt into a refined storyboard.
//!
//! A prompt is converted into numbered frame descriptions by two sequential
//! model calls (generate, then refine). Each frame can then be rendered into
//! an image and the whole sequence written out as an HTML overview.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyboard::{Credentials, HuggingFaceDriver, StoryboardConfig, StoryboardPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryboardConfig::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let driver = HuggingFaceDriver::new(credentials.hf_api_token(), &config.llm)?;
//!
//!     let storyboard = StoryboardPipeline::new(driver)
//!         .process_prompt("A flower is blooming", 5)
//!         .await?;
//!
//!     for frame in storyboard.effective_frames() {
//!         println!("{}", frame);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Storyboard is organized as a workspace with focused crates:
//!
//! - `storyboard_error` - Error types
//! - `storyboard_core` - Core data types (Frame, Storyboard, ImageRequest)
//! - `storyboard_interface` - TextDriver and ImageDriver traits
//! - `storyboard_rate_limit` - Configuration, credentials and rate limiting
//! - `storyboard_storage` - Frame image persistence
//! - `storyboard_models` - HuggingFace and Stability AI drivers
//! - `storyboard_pipeline` - Prompt building, parsing and the two-stage pipeline
//!
//! This crate (`storyboard`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod html;
mod telemetry;

pub use html::{OVERVIEW_FILE_NAME, escape_html, render_overview, write_overview};
pub use telemetry::init_logging;

// Re-export error types
pub use storyboard_error::{
    ArgumentError, ConfigError, ModelsError, ModelsErrorKind, ParseError, ParseErrorKind,
    PipelineError, PipelineErrorKind, StorageError, StorageErrorKind, StoryboardError,
    StoryboardErrorKind, StoryboardResult,
};

// Re-export core types
pub use storyboard_core::{
    Frame, GenerateRequest, GenerateResponse, ImageData, ImageRequest, Message, Role, Stage,
    Storyboard,
};

// Re-export traits
pub use storyboard_interface::{ImageDriver, TextDriver};

// Re-export configuration
pub use storyboard_rate_limit::{
    Credentials, ImageConfig, LlmConfig, OutputConfig, RateLimitConfig, RateLimiter,
    StoryboardConfig,
};

// Re-export storage
pub use storyboard_storage::{FileSystemStorage, ImageStore};

// Re-export drivers
pub use storyboard_models::{HuggingFaceDriver, StabilityDriver};

// Re-export pipeline
pub use storyboard_pipeline::{
    AssembledStoryboard, FrameImageOutcome, ImageBatch, ImageRenderer, Panel, PipelineOptions,
    RefinementPolicy, StoryboardPipeline, assemble, build_image_requests, build_prompt,
    parse_frames, validate_arguments,
};
