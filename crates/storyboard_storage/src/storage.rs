//! Storage trait for frame images.

use async_trait::async_trait;
use std::path::PathBuf;
use storyboard_core::ImageData;
use storyboard_error::StoryboardResult;

/// A place rendered frame images can be written to.
///
/// Implementations must be safe to call from several image workers at once;
/// each call writes a distinct frame.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image for `frame_number` and return where it was written.
    async fn store(&self, frame_number: u32, image: &ImageData) -> StoryboardResult<PathBuf>;

    /// Storage backend name (e.g., "filesystem").
    fn backend_name(&self) -> &'static str;
}

/// Deterministic file name for a frame image.
///
/// ```
/// use storyboard_core::ImageData;
/// use storyboard_storage::frame_file_name;
///
/// assert_eq!(frame_file_name(3, &ImageData::png(vec![])), "frame_03.png");
/// assert_eq!(frame_file_name(12, &ImageData::png(vec![])), "frame_12.png");
/// ```
pub fn frame_file_name(frame_number: u32, image: &ImageData) -> String {
    format!("frame_{:02}.{}", frame_number, image.extension())
}
