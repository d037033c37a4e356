//! Trait definitions for the Storyboard pipeline.
//!
//! The pipeline depends on two external services, a text-completion model and
//! an image-generation model. This crate defines the seams both are plugged
//! in through, so the core can be exercised with stub drivers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageDriver, TextDriver};
