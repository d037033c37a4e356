//! Stability AI text-to-image integration.

mod driver;
mod dto;

pub use driver::StabilityDriver;
pub use dto::{
    StabilityArtifact, StabilityRequest, StabilityRequestBuilder, StabilityRequestBuilderError,
    StabilityResponse, TextPrompt,
};
