//! Joins frame descriptions with rendered image paths.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use storyboard_core::Storyboard;
use tracing::warn;

/// One frame of the final storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Panel {
    /// Frame number
    frame_number: u32,
    /// Effective description of the frame
    description: String,
    /// Rendered image, if one was produced
    image_path: Option<PathBuf>,
}

/// A storyboard with every frame paired to its image, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AssembledStoryboard {
    /// The user's prompt
    original_prompt: String,
    /// Panels in frame order
    panels: Vec<Panel>,
}

impl AssembledStoryboard {
    /// Look up a panel by frame number.
    pub fn panel(&self, frame_number: u32) -> Option<&Panel> {
        self.panels.iter().find(|p| p.frame_number == frame_number)
    }

    /// Frame numbers that have no image.
    pub fn missing_images(&self) -> Vec<u32> {
        self.panels
            .iter()
            .filter(|p| p.image_path.is_none())
            .map(|p| p.frame_number)
            .collect()
    }

    /// Whether every frame has an image.
    pub fn is_complete(&self) -> bool {
        self.panels.iter().all(|p| p.image_path.is_some())
    }
}

/// Pair each effective frame with its image path.
///
/// Images are matched by frame number, never by position. Frames without an
/// image get `None`; paths for frame numbers the storyboard does not contain
/// are ignored.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use storyboard_core::{Frame, Storyboard};
/// use storyboard_pipeline::assemble;
///
/// let frames = vec![Frame::new(1, "a"), Frame::new(2, "b"), Frame::new(3, "c")];
/// let storyboard = Storyboard::new("prompt", frames.clone(), frames);
/// let images = vec![
///     (3, PathBuf::from("frame_03.png")),
///     (1, PathBuf::from("frame_01.png")),
/// ];
///
/// let assembled = assemble(&storyboard, &images);
/// assert!(assembled.panel(2).unwrap().image_path().is_none());
/// assert_eq!(assembled.missing_images(), vec![2]);
/// ```
pub fn assemble(storyboard: &Storyboard, images: &[(u32, PathBuf)]) -> AssembledStoryboard {
    let mut by_frame: HashMap<u32, &PathBuf> = HashMap::new();
    for (frame_number, path) in images {
        if storyboard.frame(*frame_number).is_none() {
            warn!(
                frame_number,
                path = %path.display(),
                "Ignoring image for unknown frame"
            );
            continue;
        }
        by_frame.insert(*frame_number, path);
    }

    let panels = storyboard
        .effective_frames()
        .iter()
        .map(|frame| Panel {
            frame_number: *frame.frame_number(),
            description: frame.description().clone(),
            image_path: by_frame.get(frame.frame_number()).map(|p| (*p).clone()),
        })
        .collect();

    AssembledStoryboard {
        original_prompt: storyboard.original_prompt().clone(),
        panels,
    }
}
