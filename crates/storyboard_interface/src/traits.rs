//! Trait definitions for model backends.

use async_trait::async_trait;
use storyboard_core::{GenerateRequest, GenerateResponse, ImageData, ImageRequest};
use storyboard_error::StoryboardResult;
use std::sync::Arc;

/// Core trait that all text-completion backends must implement.
///
/// A call either returns generated text or fails with a transport error
/// (auth, rate limit, network, empty response). Implementations must not
/// retry internally.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate text for a request.
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse>;

    /// Provider name (e.g., "huggingface").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "mistralai/Mistral-7B-Instruct-v0.2").
    fn model_name(&self) -> &str;
}

/// Trait for image-generation backends.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Render one frame description into image bytes.
    async fn render(&self, req: &ImageRequest) -> StoryboardResult<ImageData>;

    /// Provider name (e.g., "stability").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: TextDriver + ?Sized> TextDriver for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ImageDriver + ?Sized> ImageDriver for Arc<T> {
    async fn render(&self, req: &ImageRequest) -> StoryboardResult<ImageData> {
        (**self).render(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
