//! Configuration and rate limiting for the Storyboard pipeline.
//!
//! Configuration is loaded once at startup from layered TOML files and the
//! environment, then passed explicitly to drivers and the pipeline. Nothing
//! downstream reads the environment on its own.
//!
//! The [`RateLimiter`] bounds image generation: a semaphore caps requests in
//! flight and a GCRA limiter caps requests per minute.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod limiter;

pub use config::{ImageConfig, LlmConfig, OutputConfig, RateLimitConfig, StoryboardConfig};
pub use credentials::Credentials;
pub use limiter::{RateLimiter, RateLimiterGuard};
