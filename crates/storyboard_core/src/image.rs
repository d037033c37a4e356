//! Image generation request and payload types.

use crate::Frame;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A request to render one frame as an image.
///
/// Derived read-only from a [`Frame`]; the style and negative prompt are
/// shared by every frame of a storyboard.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Frame, ImageRequest};
///
/// let frame = Frame::new(2, "The bud begins to open");
/// let request = ImageRequest::from_frame(&frame, Some("watercolor"), None);
///
/// assert_eq!(*request.frame_number(), 2);
/// assert_eq!(request.prompt_text(), "The bud begins to open. watercolor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ImageRequest {
    /// Frame this image belongs to
    frame_number: u32,
    /// Frame description used as the positive prompt
    description: String,
    /// Style guidance appended to the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    /// Things the image should avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    negative: Option<String>,
}

impl ImageRequest {
    /// Derive a request from a frame. Blank style or negative text counts as absent.
    pub fn from_frame(frame: &Frame, style: Option<&str>, negative: Option<&str>) -> Self {
        Self {
            frame_number: *frame.frame_number(),
            description: frame.description().clone(),
            style: non_blank(style),
            negative: non_blank(negative),
        }
    }

    /// Positive prompt text: the description, followed by the style if present.
    pub fn prompt_text(&self) -> String {
        match &self.style {
            Some(style) => format!("{}. {}", self.description.trim_end_matches('.'), style),
            None => self.description.clone(),
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Binary image data returned by an image driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    /// MIME type of `bytes` (e.g. "image/png")
    pub mime_type: String,
}

impl ImageData {
    /// Wrap PNG bytes.
    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "image/png".to_string(),
        }
    }

    /// File extension matching the MIME type.
    ///
    /// ```
    /// use storyboard_core::ImageData;
    ///
    /// assert_eq!(ImageData::png(vec![]).extension(), "png");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}
