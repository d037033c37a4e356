//! The pipeline's output value.

use crate::Frame;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Initial and refined frame descriptions for one prompt.
///
/// A storyboard is produced by a single pipeline run and is not mutated
/// afterward. Frame numbers run contiguously from 1, and `refined_frames`
/// is either empty or numbered exactly like `frames`.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Frame, Storyboard};
///
/// let frames = vec![Frame::new(1, "A bud"), Frame::new(2, "A bloom")];
/// let storyboard = Storyboard::new("A flower is blooming", frames.clone(), vec![]);
///
/// // Falls back to the initial frames until refinement exists
/// assert_eq!(storyboard.effective_frames(), frames.as_slice());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Storyboard {
    /// The user's prompt, verbatim
    original_prompt: String,
    /// Frames from the initial generation pass
    frames: Vec<Frame>,
    /// Frames from the refinement pass
    refined_frames: Vec<Frame>,
}

impl Storyboard {
    /// Create a storyboard from its parts.
    pub fn new(
        original_prompt: impl Into<String>,
        frames: Vec<Frame>,
        refined_frames: Vec<Frame>,
    ) -> Self {
        Self {
            original_prompt: original_prompt.into(),
            frames,
            refined_frames,
        }
    }

    /// The frames presentation should use: refined when present, otherwise initial.
    pub fn effective_frames(&self) -> &[Frame] {
        if self.refined_frames.is_empty() {
            &self.frames
        } else {
            &self.refined_frames
        }
    }

    /// Look up a frame of [`Self::effective_frames`] by number.
    pub fn frame(&self, frame_number: u32) -> Option<&Frame> {
        self.effective_frames()
            .iter()
            .find(|f| *f.frame_number() == frame_number)
    }

    /// Number of frames in the storyboard.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the storyboard has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
