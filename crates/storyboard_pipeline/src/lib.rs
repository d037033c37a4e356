//! Two-stage frame generation pipeline for Storyboard.
//!
//! A prompt is turned into numbered frame descriptions by two sequential
//! model calls: the first generates the frames, the second rewrites them for
//! continuity. The frames can then be rendered into images through a bounded
//! worker pool and joined back to their descriptions by frame number.
//!
//! # Example
//!
//! ```no_run
//! use storyboard_interface::TextDriver;
//! use storyboard_pipeline::StoryboardPipeline;
//!
//! # async fn run(driver: impl TextDriver) -> storyboard_error::StoryboardResult<()> {
//! let pipeline = StoryboardPipeline::new(driver);
//! let storyboard = pipeline.process_prompt("A flower is blooming", 5).await?;
//!
//! for frame in storyboard.effective_frames() {
//!     println!("{}", frame);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod images;
mod parser;
mod pipeline;
mod prompt;
mod renderer;

pub use assembler::{AssembledStoryboard, Panel, assemble};
pub use images::build_image_requests;
pub use parser::parse_frames;
pub use pipeline::{PipelineOptions, PipelineOptionsBuilder, RefinementPolicy, StoryboardPipeline};
pub use prompt::{build_prompt, system_preamble, validate_arguments};
pub use renderer::{FrameImageOutcome, FrameImageResult, ImageBatch, ImageRenderer};
