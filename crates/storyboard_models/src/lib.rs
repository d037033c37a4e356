//! Text and image provider integrations for Storyboard.
//!
//! Each provider lives behind its own feature flag.
//!
//! # Available Providers
//!
//! - **HuggingFace** Inference API (text) - Enable with `huggingface` feature
//! - **Stability AI** text-to-image (images) - Enable with `stability` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "huggingface")]
//! # {
//! use storyboard_core::{GenerateRequest, Message};
//! use storyboard_interface::TextDriver;
//! use storyboard_models::HuggingFaceDriver;
//! use storyboard_rate_limit::StoryboardConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryboardConfig::load()?;
//! let driver = HuggingFaceDriver::new("hf_token", &config.llm)?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Describe a sunrise in 3 frames")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(any(feature = "huggingface", feature = "stability"))]
mod http;

#[cfg(feature = "huggingface")]
mod huggingface;

#[cfg(feature = "stability")]
mod stability;

#[cfg(feature = "huggingface")]
pub use huggingface::{
    HuggingFaceDriver, HuggingFaceGeneration, HuggingFaceParameters,
    HuggingFaceParametersBuilder, HuggingFaceRequest, HuggingFaceRequestBuilder,
    HuggingFaceResponse, format_instruct_prompt,
};

#[cfg(feature = "stability")]
pub use stability::{
    StabilityArtifact, StabilityDriver, StabilityRequest, StabilityRequestBuilder,
    StabilityRequestBuilderError, StabilityResponse, TextPrompt,
};
