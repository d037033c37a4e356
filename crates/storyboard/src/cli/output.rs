//! Storyboard printing.

use crate::cli::OutputFormat;
use serde::Serialize;
use storyboard::{
    AssembledStoryboard, Frame, ImageBatch, StorageError, StorageErrorKind, Storyboard,
    StoryboardResult,
};

/// Everything a run produced, in the shape printed as JSON.
#[derive(Debug, Serialize)]
struct Report<'a> {
    storyboard: &'a Storyboard,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a ImageBatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    panels: Option<&'a AssembledStoryboard>,
}

/// Print the generated frames.
pub fn print_storyboard(
    format: OutputFormat,
    storyboard: &Storyboard,
    images: Option<&ImageBatch>,
    assembled: Option<&AssembledStoryboard>,
) -> StoryboardResult<()> {
    match format {
        OutputFormat::Human => {
            print_sequence("Initial Frame Sequence", storyboard.frames());
            print_sequence("Refined Frame Sequence", storyboard.refined_frames());
            if let Some(batch) = images {
                print_images(batch);
            }
        }
        OutputFormat::Json => {
            let report = Report {
                storyboard,
                images,
                panels: assembled,
            };
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(e.to_string()))
            })?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_sequence(title: &str, frames: &[Frame]) {
    println!("\n--- {} ---", title);
    for frame in frames {
        println!("{}", frame);
    }
}

fn print_images(batch: &ImageBatch) {
    println!("\n--- Images ---");
    for (frame_number, path) in batch.image_paths() {
        println!("Frame {}: {}", frame_number, path.display());
    }
    for (frame_number, reason) in batch.failures() {
        println!("Frame {}: missing ({})", frame_number, reason);
    }
}
