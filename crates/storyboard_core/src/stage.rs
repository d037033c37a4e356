//! Generation stages.

use serde::{Deserialize, Serialize};

/// Which of the two model passes a prompt is built for.
///
/// ```
/// use storyboard_core::Stage;
///
/// assert_eq!(Stage::Initial.to_string(), "initial");
/// assert_eq!(Stage::Refine.to_string(), "refine");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// First pass: turn the user prompt into numbered frames
    Initial,
    /// Second pass: rewrite the frames for continuity
    Refine,
}
