use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ImagePayload, TextModel, VisionModel, VisionReply};

/// A scripted text model for tests. Returns pre-defined replies in order.
pub struct MockTextModel {
    replies: Vec<String>,
    fail_with: Option<String>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextModel {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: replies.into_iter().map(str::to_string).collect(),
            fail_with: None,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(vec![])
        }
    }

    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            bail!("{}", message);
        }
        self.replies
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow!("MockTextModel: no more replies (called {} times)", i + 1))
    }
}

/// A scripted vision model for tests.
///
/// With [`observing`](Self::observing) it also counts the files present in a
/// directory at call time, to check that uploads exist while the provider
/// is working and are gone afterwards.
pub struct MockVisionModel {
    replies: Vec<VisionReply>,
    fail_with: Option<String>,
    index: AtomicUsize,
    seen: Mutex<Vec<ImagePayload>>,
    watch_dir: Option<PathBuf>,
    files_during_call: Mutex<Vec<usize>>,
}

impl MockVisionModel {
    pub fn new(replies: Vec<VisionReply>) -> Self {
        Self {
            replies,
            fail_with: None,
            index: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            watch_dir: None,
            files_during_call: Mutex::new(Vec::new()),
        }
    }

    pub fn text(reply: &str) -> Self {
        Self::new(vec![VisionReply::Text(reply.to_string())])
    }

    /// Every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(vec![])
        }
    }

    pub fn observing(mut self, dir: impl Into<PathBuf>) -> Self {
        self.watch_dir = Some(dir.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Images received so far.
    pub fn seen(&self) -> Vec<ImagePayload> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// File counts in the watched directory, one per call.
    pub fn files_during_call(&self) -> Vec<usize> {
        self.files_during_call
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl VisionModel for MockVisionModel {
    async fn analyze(&self, image: &ImagePayload, _prompt: &str) -> Result<VisionReply> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(image.clone());
        }
        if let Some(dir) = &self.watch_dir {
            let count = std::fs::read_dir(dir)?.count();
            if let Ok(mut counts) = self.files_during_call.lock() {
                counts.push(count);
            }
        }

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            bail!("{}", message);
        }
        self.replies
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow!("MockVisionModel: no more replies (called {} times)", i + 1))
    }
}
