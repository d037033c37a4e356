//! Stability AI data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_core::ImageRequest;
use storyboard_rate_limit::ImageConfig;

/// A weighted prompt. Negative weights steer the image away from the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct TextPrompt {
    /// Prompt text
    text: String,
    /// Prompt weight
    weight: f32,
}

impl TextPrompt {
    /// A prompt to steer toward.
    pub fn positive(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: 1.0,
        }
    }

    /// A prompt to steer away from.
    pub fn negative(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: -1.0,
        }
    }
}

/// Text-to-image request body.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Frame, ImageRequest};
/// use storyboard_models::StabilityRequest;
/// use storyboard_rate_limit::StoryboardConfig;
///
/// let config = StoryboardConfig::bundled().unwrap();
/// let frame = Frame::new(1, "A closed bud");
/// let request = ImageRequest::from_frame(&frame, Some("watercolor"), Some("blurry"));
///
/// let body = StabilityRequest::from_image_request(&request, &config.images).unwrap();
/// assert_eq!(body.text_prompts().len(), 2);
/// assert_eq!(body.text_prompts()[0].text(), "A closed bud. watercolor");
/// assert_eq!(*body.text_prompts()[1].weight(), -1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct StabilityRequest {
    /// Positive and negative prompts
    text_prompts: Vec<TextPrompt>,
    /// Classifier-free guidance scale
    cfg_scale: f32,
    /// Image height in pixels
    height: u32,
    /// Image width in pixels
    width: u32,
    /// Number of images to generate
    samples: u32,
    /// Diffusion steps
    steps: u32,
}

impl StabilityRequest {
    /// Creates a new builder for `StabilityRequest`.
    pub fn builder() -> StabilityRequestBuilder {
        StabilityRequestBuilder::default()
    }

    /// Build the request body for one frame.
    pub fn from_image_request(
        request: &ImageRequest,
        config: &ImageConfig,
    ) -> Result<Self, StabilityRequestBuilderError> {
        let mut text_prompts = vec![TextPrompt::positive(request.prompt_text())];
        if let Some(negative) = request.negative() {
            text_prompts.push(TextPrompt::negative(negative.as_str()));
        }

        Self::builder()
            .text_prompts(text_prompts)
            .cfg_scale(config.cfg_scale)
            .height(config.height)
            .width(config.width)
            .samples(config.samples)
            .steps(config.steps)
            .build()
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StabilityArtifact {
    /// Base64-encoded PNG
    base64: String,
    /// Why generation stopped (`SUCCESS`, `CONTENT_FILTERED`, `ERROR`)
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
    /// Seed used for this image
    #[serde(default)]
    seed: Option<u64>,
}

/// Text-to-image response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StabilityResponse {
    /// Generated images
    #[serde(default)]
    artifacts: Vec<StabilityArtifact>,
}
