//! The two-stage generate-then-refine pipeline.

use crate::{build_prompt, parse_frames, system_preamble};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_core::{Frame, GenerateRequest, Message, Stage, Storyboard};
use storyboard_error::{
    ModelsError, ModelsErrorKind, PipelineError, PipelineErrorKind, StoryboardErrorKind,
    StoryboardResult,
};
use storyboard_interface::TextDriver;
use tracing::{debug, info, instrument, warn};

/// What to do when the refinement pass does not restate the initial frames.
///
/// A refinement mismatches when its frame numbers differ from the initial
/// ones, or when it contains no frames at all.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RefinementPolicy {
    /// Treat the refinement as failed and reuse the initial frames
    #[default]
    KeepInitial,
    /// Fail the run with a refinement mismatch error
    FailFast,
    /// Take each refined description whose number matches, keep the rest
    MergeByNumber,
}

/// Tunables for a pipeline run.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::{PipelineOptions, RefinementPolicy};
///
/// let options = PipelineOptions::builder()
///     .refinement_policy(RefinementPolicy::FailFast)
///     .max_tokens(Some(256))
///     .build()
///     .unwrap();
///
/// assert_eq!(*options.refinement_policy(), RefinementPolicy::FailFast);
/// assert_eq!(*options.temperature(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Builder, Getters)]
#[builder(setter(into), default)]
pub struct PipelineOptions {
    /// Mismatch handling for the refinement pass
    refinement_policy: RefinementPolicy,
    /// Token limit sent with each request; the driver default applies when `None`
    max_tokens: Option<u32>,
    /// Sampling temperature sent with each request; the driver default applies when `None`
    temperature: Option<f32>,
}

impl PipelineOptions {
    /// Creates a new builder for `PipelineOptions`.
    pub fn builder() -> PipelineOptionsBuilder {
        PipelineOptionsBuilder::default()
    }
}

/// Turns a prompt into a [`Storyboard`] with two sequential model calls.
///
/// The pipeline holds no per-run state; one instance can serve any number
/// of prompts.
#[derive(Debug, Clone)]
pub struct StoryboardPipeline<D: TextDriver> {
    driver: D,
    options: PipelineOptions,
}

impl<D: TextDriver> StoryboardPipeline<D> {
    /// Create a pipeline with default options.
    pub fn new(driver: D) -> Self {
        Self::with_options(driver, PipelineOptions::default())
    }

    /// Create a pipeline with explicit options.
    pub fn with_options(driver: D, options: PipelineOptions) -> Self {
        Self { driver, options }
    }

    /// The underlying text driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The options this pipeline runs with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Generate frames for `original_prompt`, then refine them.
    ///
    /// Arguments are validated before any model call is made. Frames
    /// numbered beyond `num_frames` are dropped; fewer frames than requested
    /// are accepted as they are.
    ///
    /// # Errors
    ///
    /// - invalid argument when `num_frames` is zero or the prompt is blank
    /// - [`PipelineErrorKind::NoFramesGenerated`] when the first pass yields nothing
    /// - [`PipelineErrorKind::NonContiguousFrames`] when the first pass skips numbers
    /// - [`PipelineErrorKind::RefinementMismatch`] under [`RefinementPolicy::FailFast`]
    /// - any transport error from the driver, unchanged
    #[instrument(
        skip(self, original_prompt),
        fields(
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
            prompt_len = original_prompt.len()
        )
    )]
    pub async fn process_prompt(
        &self,
        original_prompt: &str,
        num_frames: u32,
    ) -> StoryboardResult<Storyboard> {
        let initial_prompt = build_prompt(original_prompt, num_frames, Stage::Initial, None)?;

        info!(num_frames, "Generating initial frame sequence");
        let raw = self.call(Stage::Initial, initial_prompt).await?;
        let frames = initial_frames(&raw, num_frames)?;

        let refine_prompt =
            build_prompt(original_prompt, num_frames, Stage::Refine, Some(&frames))?;

        info!(frame_count = frames.len(), "Refining frame sequence");
        let raw = self.call(Stage::Refine, refine_prompt).await?;
        let refined_frames = reconcile(&frames, &raw, self.options.refinement_policy)?;

        Ok(Storyboard::new(original_prompt, frames, refined_frames))
    }

    async fn call(&self, stage: Stage, prompt: String) -> StoryboardResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(system_preamble(stage)),
                Message::user(prompt),
            ])
            .max_tokens(self.options.max_tokens)
            .temperature(self.options.temperature)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;

        let response = self.driver.generate(&request).await?;
        debug!(%stage, response_len = response.text().len(), "Received model output");
        Ok(response.text().to_string())
    }
}

/// Parse and validate the first-pass frames.
fn initial_frames(raw: &str, num_frames: u32) -> StoryboardResult<Vec<Frame>> {
    let mut frames = match parse_frames(raw) {
        Ok(frames) => frames,
        Err(e) if matches!(e.kind(), StoryboardErrorKind::Parse(_)) => {
            warn!(error = %e, "Initial generation contained no frames");
            return Err(PipelineError::new(PipelineErrorKind::NoFramesGenerated).into());
        }
        Err(e) => return Err(e),
    };

    let before = frames.len();
    frames.retain(|f| *f.frame_number() <= num_frames);
    if frames.len() < before {
        warn!(
            dropped = before - frames.len(),
            num_frames, "Dropping frames numbered beyond the requested count"
        );
    }
    if frames.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::NoFramesGenerated).into());
    }

    // Frames are sorted, so contiguity only needs the largest number
    let max = frames.last().map(|f| *f.frame_number()).unwrap_or(0);
    let missing: Vec<u32> = (1..=max)
        .filter(|n| !frames.iter().any(|f| f.frame_number() == n))
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::NonContiguousFrames { missing }).into());
    }

    if frames.len() < num_frames as usize {
        warn!(
            generated = frames.len(),
            requested = num_frames,
            "Model returned fewer frames than requested"
        );
    }

    Ok(frames)
}

/// Apply the refinement policy to the second-pass output.
fn reconcile(
    frames: &[Frame],
    raw: &str,
    policy: RefinementPolicy,
) -> StoryboardResult<Vec<Frame>> {
    let refined = match parse_frames(raw) {
        Ok(refined) => refined,
        Err(e) if matches!(e.kind(), StoryboardErrorKind::Parse(_)) => Vec::new(),
        Err(e) => return Err(e),
    };

    let same_numbering = refined.len() == frames.len()
        && refined
            .iter()
            .zip(frames)
            .all(|(r, f)| r.frame_number() == f.frame_number());
    if same_numbering {
        return Ok(refined);
    }

    warn!(
        expected = frames.len(),
        actual = refined.len(),
        %policy,
        "Refinement does not match the initial frames"
    );

    match policy {
        RefinementPolicy::KeepInitial => Ok(frames.to_vec()),
        RefinementPolicy::FailFast => Err(PipelineError::new(
            PipelineErrorKind::RefinementMismatch {
                expected: frames.len(),
                actual: refined.len(),
            },
        )
        .into()),
        RefinementPolicy::MergeByNumber => Ok(frames
            .iter()
            .map(|f| {
                refined
                    .iter()
                    .find(|r| r.frame_number() == f.frame_number())
                    .unwrap_or(f)
                    .clone()
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<Frame> {
        vec![
            Frame::new(1, "a"),
            Frame::new(2, "b"),
            Frame::new(3, "c"),
        ]
    }

    #[test]
    fn test_initial_frames_truncates_extras() {
        let frames = initial_frames("Frame 1: a\nFrame 2: b\nFrame 3: c", 2).unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_initial_frames_accepts_fewer() {
        let frames = initial_frames("Frame 1: a\nFrame 2: b", 5).unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_initial_frames_all_beyond_count() {
        let err = initial_frames("Frame 4: d\nFrame 5: e", 3).unwrap_err();
        assert!(format!("{}", err).contains("No frames"));
    }

    #[test]
    fn test_initial_frames_gap() {
        let err = initial_frames("Frame 1: a\nFrame 3: c", 3).unwrap_err();
        match err.kind() {
            StoryboardErrorKind::Pipeline(e) => assert_eq!(
                e.kind,
                PipelineErrorKind::NonContiguousFrames { missing: vec![2] }
            ),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_reconcile_matching() {
        let refined = reconcile(&three(), "Frame 1: A\nFrame 2: B\nFrame 3: C", RefinementPolicy::FailFast)
            .unwrap();
        assert_eq!(refined[2].description(), "C");
    }

    #[test]
    fn test_reconcile_merge_by_number() {
        let refined = reconcile(&three(), "Frame 1: A\nFrame 3: C", RefinementPolicy::MergeByNumber)
            .unwrap();
        let descriptions: Vec<_> = refined.iter().map(|f| f.description().as_str()).collect();
        assert_eq!(descriptions, vec!["A", "b", "C"]);
    }

    #[test]
    fn test_reconcile_keep_initial_on_garbage() {
        let refined = reconcile(&three(), "I cannot do that.", RefinementPolicy::KeepInitial).unwrap();
        assert_eq!(refined, three());
    }

    #[test]
    fn test_reconcile_fail_fast_extra_frame() {
        let err = reconcile(
            &three(),
            "Frame 1: A\nFrame 2: B\nFrame 3: C\nFrame 4: D",
            RefinementPolicy::FailFast,
        )
        .unwrap_err();
        match err.kind() {
            StoryboardErrorKind::Pipeline(e) => assert_eq!(
                e.kind,
                PipelineErrorKind::RefinementMismatch {
                    expected: 3,
                    actual: 4
                }
            ),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(RefinementPolicy::MergeByNumber.to_string(), "merge-by-number");
        assert_eq!(
            "fail-fast".parse::<RefinementPolicy>().unwrap(),
            RefinementPolicy::FailFast
        );
    }
}
