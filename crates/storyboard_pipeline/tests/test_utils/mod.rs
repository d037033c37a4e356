//! Mock drivers for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyboard_core::{GenerateRequest, GenerateResponse, ImageData, ImageRequest, Role};
use storyboard_error::{ModelsError, ModelsErrorKind, StoryboardResult};
use storyboard_interface::{ImageDriver, TextDriver};
use storyboard_storage::ImageStore;

/// How the mock text driver answers.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Answer with canned frames first, then echo the refinement instruction back
    Echo { frames: u32 },
    /// Answer each call with the next scripted text
    Scripted(Vec<String>),
    /// Fail every call with a rate-limit error
    RateLimited,
}

/// Text driver that counts calls and records requests.
#[derive(Debug, Clone)]
pub struct MockTextDriver {
    behavior: MockBehavior,
    script: Arc<Mutex<VecDeque<String>>>,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockTextDriver {
    pub fn new(behavior: MockBehavior) -> Self {
        let script = match &behavior {
            MockBehavior::Scripted(texts) => texts.iter().cloned().collect(),
            _ => VecDeque::new(),
        };
        Self {
            behavior,
            script: Arc::new(Mutex::new(script)),
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo(frames: u32) -> Self {
        Self::new(MockBehavior::Echo { frames })
    }

    pub fn scripted(texts: &[&str]) -> Self {
        Self::new(MockBehavior::Scripted(
            texts.iter().map(|t| t.to_string()).collect(),
        ))
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(req.clone());

        match &self.behavior {
            MockBehavior::Echo { frames } => {
                if call == 1 {
                    let text = (1..=*frames)
                        .map(|n| format!("Frame {}: Stage {} of the scene", n, n))
                        .collect::<Vec<_>>()
                        .join("\n");
                    Ok(GenerateResponse::new(format!("Here you go:\n{}", text)))
                } else {
                    let user = req.last_user_text().unwrap_or_default();
                    Ok(GenerateResponse::new(user))
                }
            }
            MockBehavior::Scripted(_) => {
                let text = self.script.lock().unwrap().pop_front().unwrap_or_default();
                Ok(GenerateResponse::new(text))
            }
            MockBehavior::RateLimited => Err(ModelsError::new(ModelsErrorKind::RateLimited {
                provider: "mock",
                message: "slow down".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Count user messages of a recorded request.
pub fn user_messages(req: &GenerateRequest) -> usize {
    req.messages().iter().filter(|m| m.role == Role::User).count()
}

/// Image driver that fails for chosen frames and tracks concurrency.
#[derive(Debug, Clone, Default)]
pub struct MockImageDriver {
    fail_frames: HashSet<u32>,
    call_count: Arc<Mutex<usize>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl MockImageDriver {
    pub fn failing(frames: &[u32]) -> Self {
        Self {
            fail_frames: frames.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn render(&self, req: &ImageRequest) -> StoryboardResult<ImageData> {
        *self.call_count.lock().unwrap() += 1;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        // Later frames finish first so completion order differs from frame order
        let delay = 40u64.saturating_sub(*req.frame_number() as u64 * 5);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_frames.contains(req.frame_number()) {
            return Err(ModelsError::new(ModelsErrorKind::Api {
                provider: "mock",
                status: 500,
                message: "render failed".to_string(),
            })
            .into());
        }
        Ok(ImageData::png(vec![*req.frame_number() as u8]))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Store that keeps nothing and hands back predictable paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stored: Arc<Mutex<Vec<u32>>>,
}

impl MemoryStore {
    pub fn stored(&self) -> Vec<u32> {
        let mut stored = self.stored.lock().unwrap().clone();
        stored.sort_unstable();
        stored
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn store(&self, frame_number: u32, image: &ImageData) -> StoryboardResult<PathBuf> {
        self.stored.lock().unwrap().push(frame_number);
        Ok(PathBuf::from(format!(
            "frame_{:02}.{}",
            frame_number,
            image.extension()
        )))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
