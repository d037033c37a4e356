//! A single numbered step of a storyboard.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One numbered frame description.
///
/// # Examples
///
/// ```
/// use storyboard_core::Frame;
///
/// let frame = Frame::new(1, "A closed bud in morning light");
/// assert_eq!(*frame.frame_number(), 1);
/// assert_eq!(frame.to_string(), "Frame 1: A closed bud in morning light");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_more::Display,
)]
#[display("Frame {}: {}", frame_number, description)]
pub struct Frame {
    /// Position in the sequence, starting at 1
    frame_number: u32,
    /// What the frame shows
    description: String,
}

impl Frame {
    /// Create a frame.
    pub fn new(frame_number: u32, description: impl Into<String>) -> Self {
        Self {
            frame_number,
            description: description.into(),
        }
    }
}
