//! HuggingFace Inference API integration.

mod conversions;
mod driver;
mod dto;

pub use conversions::format_instruct_prompt;
pub use driver::HuggingFaceDriver;
pub use dto::{
    HuggingFaceGeneration, HuggingFaceParameters, HuggingFaceParametersBuilder,
    HuggingFaceRequest, HuggingFaceRequestBuilder, HuggingFaceResponse,
};
