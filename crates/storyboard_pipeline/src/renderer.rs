//! Bounded concurrent image rendering.

use futures_util::StreamExt;
use futures_util::stream;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storyboard_core::ImageRequest;
use storyboard_interface::ImageDriver;
use storyboard_rate_limit::RateLimiter;
use storyboard_storage::ImageStore;
use tracing::{info, instrument, warn};

/// What happened to one frame's image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameImageOutcome {
    /// The image was rendered and written to this path
    Rendered(PathBuf),
    /// Rendering or storing failed for this reason
    Failed(String),
}

/// Outcome for a single frame number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameImageResult {
    /// Frame the image belongs to
    pub frame_number: u32,
    /// Rendered path or failure reason
    pub outcome: FrameImageOutcome,
}

/// Per-frame results of one rendering run, sorted by frame number.
///
/// A failed frame never aborts the batch; callers decide what partial
/// coverage means for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBatch {
    results: Vec<FrameImageResult>,
}

impl ImageBatch {
    /// Build a batch, sorting results by frame number.
    pub fn new(mut results: Vec<FrameImageResult>) -> Self {
        results.sort_by_key(|r| r.frame_number);
        Self { results }
    }

    /// All per-frame results.
    pub fn results(&self) -> &[FrameImageResult] {
        &self.results
    }

    /// `(frame_number, path)` for every rendered frame, ready for the assembler.
    pub fn image_paths(&self) -> Vec<(u32, PathBuf)> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                FrameImageOutcome::Rendered(path) => Some((r.frame_number, path.clone())),
                FrameImageOutcome::Failed(_) => None,
            })
            .collect()
    }

    /// `(frame_number, reason)` for every failed frame.
    pub fn failures(&self) -> Vec<(u32, &str)> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                FrameImageOutcome::Failed(reason) => Some((r.frame_number, reason.as_str())),
                FrameImageOutcome::Rendered(_) => None,
            })
            .collect()
    }

    /// Whether any frame is missing its image.
    pub fn is_partial(&self) -> bool {
        self.results
            .iter()
            .any(|r| matches!(r.outcome, FrameImageOutcome::Failed(_)))
    }

    /// Number of frames that were attempted.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Renders image requests through a bounded worker pool.
///
/// At most `max_concurrent` requests are in flight at once, further throttled
/// by the limiter's requests-per-minute quota. Results are keyed by frame
/// number, so completion order does not matter.
#[derive(Debug)]
pub struct ImageRenderer<D: ImageDriver, S: ImageStore> {
    driver: D,
    store: S,
    limiter: RateLimiter,
}

impl<D: ImageDriver, S: ImageStore> ImageRenderer<D, S> {
    /// Create a renderer.
    pub fn new(driver: D, store: S, limiter: RateLimiter) -> Self {
        Self {
            driver,
            store,
            limiter,
        }
    }

    /// Render and store every request.
    #[instrument(
        skip(self, requests),
        fields(
            provider = self.driver.provider_name(),
            count = requests.len(),
            max_concurrent = self.limiter.max_concurrent()
        )
    )]
    pub async fn render_all(&self, requests: Vec<ImageRequest>) -> ImageBatch {
        let total = requests.len();
        let results = stream::iter(requests)
            .map(|request| self.render_one(request, total))
            .buffer_unordered(self.limiter.max_concurrent())
            .collect::<Vec<_>>()
            .await;

        let batch = ImageBatch::new(results);
        info!(
            rendered = batch.len() - batch.failures().len(),
            failed = batch.failures().len(),
            "Image rendering finished"
        );
        batch
    }

    async fn render_one(&self, request: ImageRequest, total: usize) -> FrameImageResult {
        let frame_number = *request.frame_number();
        let _guard = self.limiter.acquire().await;

        info!(
            frame_number,
            total,
            description = %request.description().chars().take(50).collect::<String>(),
            "Generating image"
        );

        let outcome = match self.driver.render(&request).await {
            Ok(image) => match self.store.store(frame_number, &image).await {
                Ok(path) => FrameImageOutcome::Rendered(path),
                Err(e) => {
                    warn!(frame_number, error = %e, "Failed to store image");
                    FrameImageOutcome::Failed(e.to_string())
                }
            },
            Err(e) => {
                warn!(frame_number, error = %e, "Failed to render image");
                FrameImageOutcome::Failed(e.to_string())
            }
        };

        FrameImageResult {
            frame_number,
            outcome,
        }
    }
}
