//! Image request derivation.

use storyboard_core::{ImageRequest, Storyboard};

/// One image request per effective frame, in frame order.
///
/// Refined frames are used when present, otherwise the initial ones. Blank
/// style or negative text is treated as absent.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Frame, Storyboard};
/// use storyboard_pipeline::build_image_requests;
///
/// let frames = vec![Frame::new(1, "A bud"), Frame::new(2, "A bloom")];
/// let storyboard = Storyboard::new("A flower is blooming", frames.clone(), frames);
///
/// let requests = build_image_requests(&storyboard, Some("watercolor"), None);
/// assert_eq!(requests.len(), 2);
/// assert_eq!(requests[0].style().as_deref(), Some("watercolor"));
/// assert!(requests[0].negative().is_none());
/// ```
pub fn build_image_requests(
    storyboard: &Storyboard,
    style: Option<&str>,
    negative: Option<&str>,
) -> Vec<ImageRequest> {
    storyboard
        .effective_frames()
        .iter()
        .map(|frame| ImageRequest::from_frame(frame, style, negative))
        .collect()
}
