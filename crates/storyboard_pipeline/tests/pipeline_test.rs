//! End-to-end pipeline tests against mock drivers.

mod test_utils;

use storyboard_core::{Role, Stage};
use storyboard_error::{PipelineErrorKind, StoryboardErrorKind};
use storyboard_pipeline::{PipelineOptions, RefinementPolicy, StoryboardPipeline, system_preamble};
use test_utils::{MockTextDriver, user_messages};

fn pipeline_with(driver: MockTextDriver, policy: RefinementPolicy) -> StoryboardPipeline<MockTextDriver> {
    let options = PipelineOptions::builder()
        .refinement_policy(policy)
        .build()
        .unwrap();
    StoryboardPipeline::with_options(driver, options)
}

#[tokio::test]
async fn test_flower_prompt_yields_five_frames() {
    let driver = MockTextDriver::echo(5);
    let pipeline = StoryboardPipeline::new(driver.clone());

    let storyboard = pipeline
        .process_prompt("A flower is blooming", 5)
        .await
        .unwrap();

    assert_eq!(storyboard.original_prompt(), "A flower is blooming");
    assert_eq!(storyboard.frames().len(), 5);
    assert_eq!(storyboard.refined_frames().len(), 5);
    assert_eq!(*storyboard.frames()[0].frame_number(), 1);
    assert_eq!(*storyboard.refined_frames()[0].frame_number(), 1);
    assert_eq!(driver.call_count(), 2);
}

#[tokio::test]
async fn test_requests_carry_stage_preambles() {
    let driver = MockTextDriver::echo(3);
    let pipeline = StoryboardPipeline::new(driver.clone());

    pipeline.process_prompt("A flower is blooming", 3).await.unwrap();

    let requests = driver.requests();
    assert_eq!(requests.len(), 2);

    for (request, stage) in requests.iter().zip([Stage::Initial, Stage::Refine]) {
        assert_eq!(request.messages()[0].role, Role::System);
        assert_eq!(request.messages()[0].content, system_preamble(stage));
        assert_eq!(user_messages(request), 1);
    }

    // Refinement sees the initial frames
    let refine_text = requests[1].last_user_text().unwrap();
    assert!(refine_text.contains("Frame 2: Stage 2 of the scene"));
}

#[tokio::test]
async fn test_zero_frames_rejected_before_any_call() {
    let driver = MockTextDriver::echo(5);
    let pipeline = StoryboardPipeline::new(driver.clone());

    let err = pipeline
        .process_prompt("A flower is blooming", 0)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StoryboardErrorKind::InvalidArgument(_)));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_blank_prompt_rejected_before_any_call() {
    let driver = MockTextDriver::echo(5);
    let pipeline = StoryboardPipeline::new(driver.clone());

    let err = pipeline.process_prompt("  \n", 3).await.unwrap_err();

    assert!(matches!(err.kind(), StoryboardErrorKind::InvalidArgument(_)));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_no_frames_generated() {
    let driver = MockTextDriver::scripted(&["I'm sorry, I can't help with that."]);
    let pipeline = StoryboardPipeline::new(driver.clone());

    let err = pipeline.process_prompt("A flower", 3).await.unwrap_err();

    match err.kind() {
        StoryboardErrorKind::Pipeline(e) => {
            assert_eq!(e.kind, PipelineErrorKind::NoFramesGenerated)
        }
        other => panic!("unexpected error: {}", other),
    }
    // Refinement is never attempted
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_gap_in_initial_frames() {
    let driver = MockTextDriver::scripted(&["Frame 1: a\nFrame 3: c"]);
    let pipeline = StoryboardPipeline::new(driver);

    let err = pipeline.process_prompt("A flower", 3).await.unwrap_err();

    match err.kind() {
        StoryboardErrorKind::Pipeline(e) => assert_eq!(
            e.kind,
            PipelineErrorKind::NonContiguousFrames { missing: vec![2] }
        ),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_extra_frames_truncated() {
    let driver = MockTextDriver::scripted(&[
        "Frame 1: a\nFrame 2: b\nFrame 3: c\nFrame 4: d",
        "Frame 1: A\nFrame 2: B",
    ]);
    let pipeline = StoryboardPipeline::new(driver);

    let storyboard = pipeline.process_prompt("A flower", 2).await.unwrap();

    assert_eq!(storyboard.frames().len(), 2);
    assert_eq!(storyboard.refined_frames()[1].description(), "B");
}

#[tokio::test]
async fn test_fewer_frames_accepted() {
    let driver = MockTextDriver::scripted(&["Frame 1: a\nFrame 2: b", "Frame 1: A\nFrame 2: B"]);
    let pipeline = StoryboardPipeline::new(driver);

    let storyboard = pipeline.process_prompt("A flower", 4).await.unwrap();

    assert_eq!(storyboard.frames().len(), 2);
    assert_eq!(storyboard.refined_frames().len(), 2);
}

#[tokio::test]
async fn test_mismatch_keep_initial() {
    let driver = MockTextDriver::scripted(&["Frame 1: a\nFrame 2: b\nFrame 3: c", "Frame 1: A\nFrame 2: B"]);
    let pipeline = pipeline_with(driver, RefinementPolicy::KeepInitial);

    let storyboard = pipeline.process_prompt("A flower", 3).await.unwrap();

    assert_eq!(storyboard.refined_frames(), storyboard.frames());
}

#[tokio::test]
async fn test_mismatch_fail_fast() {
    let driver = MockTextDriver::scripted(&["Frame 1: a\nFrame 2: b\nFrame 3: c", "Frame 1: A\nFrame 2: B"]);
    let pipeline = pipeline_with(driver, RefinementPolicy::FailFast);

    let err = pipeline.process_prompt("A flower", 3).await.unwrap_err();

    match err.kind() {
        StoryboardErrorKind::Pipeline(e) => assert_eq!(
            e.kind,
            PipelineErrorKind::RefinementMismatch {
                expected: 3,
                actual: 2
            }
        ),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_mismatch_merge_by_number() {
    let driver = MockTextDriver::scripted(&["Frame 1: a\nFrame 2: b\nFrame 3: c", "Frame 1: A\nFrame 3: C"]);
    let pipeline = pipeline_with(driver, RefinementPolicy::MergeByNumber);

    let storyboard = pipeline.process_prompt("A flower", 3).await.unwrap();

    let descriptions: Vec<_> = storyboard
        .refined_frames()
        .iter()
        .map(|f| f.description().as_str())
        .collect();
    assert_eq!(descriptions, vec!["A", "b", "C"]);
}

#[tokio::test]
async fn test_unparseable_refinement_falls_back() {
    let driver = MockTextDriver::scripted(&["Frame 1: a\nFrame 2: b", "Looks great already!"]);
    let pipeline = StoryboardPipeline::new(driver);

    let storyboard = pipeline.process_prompt("A flower", 2).await.unwrap();

    assert_eq!(storyboard.refined_frames(), storyboard.frames());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let driver = MockTextDriver::new(test_utils::MockBehavior::RateLimited);
    let pipeline = StoryboardPipeline::new(driver.clone());

    let err = pipeline.process_prompt("A flower", 3).await.unwrap_err();

    assert!(err.is_transport());
    // No retries
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn test_options_forwarded_to_requests() {
    let driver = MockTextDriver::echo(2);
    let options = PipelineOptions::builder()
        .max_tokens(Some(128))
        .temperature(Some(0.3))
        .build()
        .unwrap();
    let pipeline = StoryboardPipeline::with_options(driver.clone(), options);

    pipeline.process_prompt("A flower", 2).await.unwrap();

    for request in driver.requests() {
        assert_eq!(*request.max_tokens(), Some(128));
        assert_eq!(*request.temperature(), Some(0.3));
    }
}
