//! Frame extraction from raw model output.
//!
//! Models rarely follow the requested `Frame N: ...` format exactly, so any
//! line that starts with a numeric label and a separator counts as a frame:
//!
//! ```text
//! Frame 3: The petals unfold
//! 3. The petals unfold
//! 3: The petals unfold
//! **Frame 3:** The petals unfold
//! - Frame 3 - The petals unfold
//! ```
//!
//! A marker may stand alone on its line with the description below it, and a
//! description may wrap over several lines. Text following a marker belongs
//! to that frame until the next marker or, once text has started, a blank
//! line. Everything else (preambles, commentary) is ignored.

use regex::Regex;
use std::collections::BTreeMap;
use storyboard_core::Frame;
use storyboard_error::{ParseError, ParseErrorKind, StoryboardResult};
use tracing::{debug, trace};

/// Leading bullets and emphasis, an optional `Frame` word, the number, a
/// separator, then the description.
const FRAME_MARKER: &str =
    r"(?i)^\s*(?:[-*+>#]+\s*)*(?:\*\*|__)?\s*(?:frame\s*)?(\d+)\s*(?:\*\*|__)?\s*[:.)\-–—]\s*(.*)$";

/// Parse model output into frames, sorted by frame number.
///
/// Frame numbers are kept as written: gaps are preserved and nothing is
/// renumbered. Frame 0 and numbers that do not fit a `u32` are treated as
/// noise. When a number appears more than once the last occurrence wins.
///
/// # Errors
///
/// Returns [`ParseErrorKind::EmptyResult`] when no frame marker is followed by text.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::parse_frames;
///
/// let raw = "Here is your storyboard:\n\
///            Frame 1: A closed bud\n\
///            **Frame 2:** Petals begin to open\n\
///            3. A full bloom\n";
///
/// let frames = parse_frames(raw).unwrap();
/// assert_eq!(frames.len(), 3);
/// assert_eq!(frames[1].description(), "Petals begin to open");
///
/// assert!(parse_frames("Sorry, I can't help with that.").is_err());
/// ```
pub fn parse_frames(raw: &str) -> StoryboardResult<Vec<Frame>> {
    let marker = Regex::new(FRAME_MARKER)
        .map_err(|e| ParseError::new(ParseErrorKind::Pattern(e.to_string())))?;

    let mut frames = BTreeMap::new();
    let mut current: Option<(u32, String)> = None;

    for line in raw.lines() {
        if let Some(caps) = marker.captures(line) {
            finish_frame(&mut frames, current.take());
            current = match caps[1].parse::<u32>() {
                Ok(0) => None,
                Ok(frame_number) => Some((frame_number, clean_description(&caps[2]).to_string())),
                Err(_) => {
                    trace!(line, "Skipping frame number outside u32 range");
                    None
                }
            };
            continue;
        }

        let text = line.trim();
        if text.is_empty() {
            if current.as_ref().is_some_and(|(_, d)| !d.is_empty()) {
                finish_frame(&mut frames, current.take());
            }
            continue;
        }

        if let Some((_, description)) = current.as_mut() {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(trim_emphasis(text));
        }
    }
    finish_frame(&mut frames, current.take());

    if frames.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyResult(raw.len())).into());
    }

    Ok(frames
        .into_iter()
        .map(|(frame_number, description)| Frame::new(frame_number, description))
        .collect())
}

fn finish_frame(frames: &mut BTreeMap<u32, String>, segment: Option<(u32, String)>) {
    let Some((frame_number, description)) = segment else {
        return;
    };
    if description.is_empty() {
        trace!(frame_number, "Frame marker without text");
        return;
    }
    if frames.insert(frame_number, description).is_some() {
        debug!(frame_number, "Duplicate frame marker, keeping the later one");
    }
}

/// Description text following a marker, without leftover emphasis or a bold title.
fn clean_description(text: &str) -> &str {
    let mut text = text.trim();
    // closing emphasis of a bold marker such as `**Frame 1:**`
    for delim in ["**", "__"] {
        if let Some(rest) = text.strip_prefix(delim) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                text = rest.trim_start();
            }
            break;
        }
    }
    trim_emphasis(strip_title(text))
}

/// Drop a leading `**Title**:` or `**Title:**`, keeping the text after it.
fn strip_title(text: &str) -> &str {
    for delim in ["**", "__"] {
        let Some(rest) = text.strip_prefix(delim) else {
            continue;
        };
        let Some(end) = rest.find(delim) else {
            return text;
        };
        let after = rest[end + delim.len()..].trim_start();
        if rest[..end].trim_end().ends_with(':') {
            return after;
        }
        return after.strip_prefix(':').map(str::trim_start).unwrap_or(text);
    }
    text
}

fn trim_emphasis(text: &str) -> &str {
    text.trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_error::StoryboardErrorKind;

    fn numbers(frames: &[Frame]) -> Vec<u32> {
        frames.iter().map(|f| *f.frame_number()).collect()
    }

    #[test]
    fn test_well_formed_output() {
        let raw = (1..=5)
            .map(|n| format!("Frame {}: Description {}", n, n))
            .collect::<Vec<_>>()
            .join("\n");

        let frames = parse_frames(&raw).unwrap();

        assert_eq!(numbers(&frames), vec![1, 2, 3, 4, 5]);
        assert_eq!(frames[4].description(), "Description 5");
    }

    #[test]
    fn test_marker_variants() {
        let raw = "Frame 1: one\n2. two\n3: three\n**Frame 4:** four\n- Frame 5 - five\n**Frame 6**: six\n7) seven";
        let frames = parse_frames(raw).unwrap();

        assert_eq!(numbers(&frames), vec![1, 2, 3, 4, 5, 6, 7]);
        let descriptions: Vec<_> = frames.iter().map(|f| f.description().as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["one", "two", "three", "four", "five", "six", "seven"]
        );
    }

    #[test]
    fn test_case_and_whitespace() {
        let frames = parse_frames("   FRAME 1 :   *A bud*   ").unwrap();
        assert_eq!(frames, vec![Frame::new(1, "A bud")]);
    }

    #[test]
    fn test_noise_is_ignored() {
        let raw = "Sure! Here are the frames.\n\nFrame 1: A bud\n\nI hope this helps.\nFrame 2: A bloom";
        let frames = parse_frames(raw).unwrap();
        assert_eq!(numbers(&frames), vec![1, 2]);
    }

    #[test]
    fn test_duplicates_last_wins() {
        let frames = parse_frames("Frame 1: first\nFrame 2: middle\nFrame 1: second").unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].description(), "second");
    }

    #[test]
    fn test_gaps_preserved_and_sorted() {
        let frames = parse_frames("Frame 4: d\nFrame 1: a\nFrame 2: b").unwrap();
        assert_eq!(numbers(&frames), vec![1, 2, 4]);
    }

    #[test]
    fn test_zero_and_overflow_are_noise() {
        let frames = parse_frames("Frame 0: zero\nFrame 99999999999: huge\nFrame 1: one").unwrap();
        assert_eq!(numbers(&frames), vec![1]);
    }

    #[test]
    fn test_marker_without_text_is_noise() {
        assert!(parse_frames("Frame 1:\nFrame 2:   ").is_err());
    }

    #[test]
    fn test_marker_on_its_own_line() {
        let raw = "**Frame 1:**\nA closed bud at dawn.\n\n**Frame 2:**\nPetals begin to open.";
        let frames = parse_frames(raw).unwrap();

        assert_eq!(
            frames,
            vec![
                Frame::new(1, "A closed bud at dawn."),
                Frame::new(2, "Petals begin to open."),
            ]
        );
    }

    #[test]
    fn test_wrapped_description() {
        let raw = "Frame 1: A bud\nin morning light.\nFrame 2: A bloom\n\nHope you like it!";
        let frames = parse_frames(raw).unwrap();

        assert_eq!(frames[0].description(), "A bud in morning light.");
        assert_eq!(frames[1].description(), "A bloom");
    }

    #[test]
    fn test_leading_text_before_first_marker() {
        let raw = "Here is the storyboard\nyou asked for.\nFrame 1: A bud";
        assert_eq!(parse_frames(raw).unwrap(), vec![Frame::new(1, "A bud")]);
    }

    #[test]
    fn test_bold_title_removed() {
        let raw = "1. **Opening Shot**: A closed bud\n2. **Close-up:** Petals part\n3. **A full bloom**";
        let frames = parse_frames(raw).unwrap();
        let descriptions: Vec<_> = frames.iter().map(|f| f.description().as_str()).collect();

        assert_eq!(descriptions, vec!["A closed bud", "Petals part", "A full bloom"]);
    }

    #[test]
    fn test_empty_input() {
        let err = parse_frames("").unwrap_err();
        match err.kind() {
            StoryboardErrorKind::Parse(e) => {
                assert_eq!(e.kind, ParseErrorKind::EmptyResult(0))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_idempotent() {
        let raw = "Intro\nFrame 2: b\n1. a\nFrame 2: b again";
        assert_eq!(parse_frames(raw).unwrap(), parse_frames(raw).unwrap());
    }
}
