//! Instruction text for the two model passes.

use storyboard_core::{Frame, Stage};
use storyboard_error::{ArgumentError, StoryboardResult};

/// Build the instruction string for one stage.
///
/// The INITIAL instruction embeds the prompt and the frame count. The REFINE
/// instruction embeds the prompt and the full numbered list of prior frames,
/// and asks for the same number of frames back.
///
/// No line of the instruction itself begins with a frame marker, so a model
/// that echoes the instruction cannot inject frames that were never written.
///
/// # Errors
///
/// Returns an invalid-argument error when `num_frames` is zero, when the
/// prompt is blank, or when REFINE is requested without prior frames.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Frame, Stage};
/// use storyboard_pipeline::build_prompt;
///
/// let initial = build_prompt("A flower is blooming", 5, Stage::Initial, None).unwrap();
/// assert!(initial.contains("5 sequential video frames"));
/// assert!(initial.contains("\"A flower is blooming\""));
///
/// let frames = vec![Frame::new(1, "A bud"), Frame::new(2, "A bloom")];
/// let refine = build_prompt("A flower is blooming", 2, Stage::Refine, Some(&frames)).unwrap();
/// assert!(refine.contains("Frame 1: A bud\nFrame 2: A bloom"));
///
/// assert!(build_prompt("A flower is blooming", 0, Stage::Initial, None).is_err());
/// assert!(build_prompt("A flower is blooming", 2, Stage::Refine, None).is_err());
/// ```
pub fn build_prompt(
    original_prompt: &str,
    num_frames: u32,
    stage: Stage,
    prior_frames: Option<&[Frame]>,
) -> StoryboardResult<String> {
    validate_arguments(original_prompt, num_frames)?;
    let prompt = original_prompt.trim();

    match stage {
        Stage::Initial => Ok(initial_instruction(prompt, num_frames)),
        Stage::Refine => match prior_frames {
            Some(frames) if !frames.is_empty() => Ok(refine_instruction(prompt, frames)),
            _ => Err(ArgumentError::new("refinement requires the initial frames"))?,
        },
    }
}

/// Check a prompt and frame count before any work is done.
///
/// # Errors
///
/// Returns an invalid-argument error when `num_frames` is zero or the prompt
/// is blank.
pub fn validate_arguments(original_prompt: &str, num_frames: u32) -> StoryboardResult<()> {
    if num_frames < 1 {
        Err(ArgumentError::new("num_frames must be at least 1"))?
    }
    if original_prompt.trim().is_empty() {
        Err(ArgumentError::new("prompt must not be blank"))?
    }
    Ok(())
}

fn initial_instruction(prompt: &str, num_frames: u32) -> String {
    format!(
        "Convert this text into {n} sequential video frames: \"{prompt}\"\n\n\
         Describe a coherent visual progression in which each frame builds on the \
         previous one with clear visual elements. Respond with exactly {n} lines, \
         one per frame, each formatted as `Frame N: <description>` with N running \
         from 1 to {n}. Do not add any other text.",
        n = num_frames,
        prompt = prompt,
    )
}

fn refine_instruction(prompt: &str, frames: &[Frame]) -> String {
    let frames_text = frames
        .iter()
        .map(Frame::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Refine these frame descriptions for the prompt: \"{prompt}\"\n\n\
         {frames_text}\n\n\
         Make sure the sequence flows naturally, uses consistent terminology, keeps \
         a logical progression and preserves visual continuity between frames while \
         keeping the original meaning of each one. Respond with exactly {n} lines, \
         one per frame, each formatted as `Frame N: <description>` using the same \
         frame numbers. Do not add any other text.",
        prompt = prompt,
        frames_text = frames_text,
        n = frames.len(),
    )
}

/// Role description sent as the system message for a stage.
pub fn system_preamble(stage: Stage) -> &'static str {
    match stage {
        Stage::Initial => {
            "You are a creative assistant that converts text prompts into a sequence of \
             detailed frame descriptions for a video storyboard. Each frame should \
             progress the story logically and show clear change across the sequence."
        }
        Stage::Refine => {
            "You are a detail-oriented editor that refines video frame descriptions so \
             they keep consistent terminology, semantic coherence and smooth visual \
             progression."
        }
    }
}
