//! HuggingFace Inference API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Text-generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct HuggingFaceParameters {
    /// Maximum tokens to generate
    max_new_tokens: u32,
    /// Temperature for sampling
    temperature: f32,
    /// Sample instead of greedy decoding
    #[builder(default = "true")]
    do_sample: bool,
    /// Whether the server should echo the prompt in front of the generation
    #[builder(default = "false")]
    return_full_text: bool,
}

impl HuggingFaceParameters {
    /// Creates a new builder for `HuggingFaceParameters`.
    pub fn builder() -> HuggingFaceParametersBuilder {
        HuggingFaceParametersBuilder::default()
    }
}

/// HuggingFace text-generation request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct HuggingFaceRequest {
    /// Prompt text, already formatted for the model's chat template
    inputs: String,
    /// Generation parameters
    parameters: HuggingFaceParameters,
}

impl HuggingFaceRequest {
    /// Creates a new builder for `HuggingFaceRequest`.
    pub fn builder() -> HuggingFaceRequestBuilder {
        HuggingFaceRequestBuilder::default()
    }
}

/// One generation as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HuggingFaceGeneration {
    /// Generated text
    generated_text: String,
}

/// HuggingFace API response body.
///
/// Depending on the deployment the API answers with either a list of
/// generations or a single object.
///
/// # Examples
///
/// ```
/// use storyboard_models::HuggingFaceResponse;
///
/// let batch: HuggingFaceResponse =
///     serde_json::from_str(r#"[{"generated_text": "Frame 1: A bud"}]"#).unwrap();
/// let single: HuggingFaceResponse =
///     serde_json::from_str(r#"{"generated_text": "Frame 1: A bud"}"#).unwrap();
///
/// assert_eq!(batch.into_text(), Some("Frame 1: A bud".to_string()));
/// assert_eq!(single.into_text(), Some("Frame 1: A bud".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HuggingFaceResponse {
    /// `[{"generated_text": ...}, ...]`
    Batch(Vec<HuggingFaceGeneration>),
    /// `{"generated_text": ...}`
    Single(HuggingFaceGeneration),
}

impl HuggingFaceResponse {
    /// Text of the first generation, if there is one.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Batch(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text),
            Self::Single(generation) => Some(generation.generated_text),
        }
    }
}
