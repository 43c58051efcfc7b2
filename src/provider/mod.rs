//! Clients for the hosted models.
//!
//! Each handler talks to exactly one provider through a small trait, so the
//! HTTP layer and tests can swap in [`mock`] implementations.

pub mod anthropic;
pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

/// A base64-encoded image ready to embed in a provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub media_type: &'static str,
    pub data: String,
}

/// What the vision provider sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionReply {
    /// 2xx: the text of the reply.
    Text(String),
    /// Non-2xx: reported to the caller, not raised.
    Rejected { status: u16, body: String },
}

/// A model that answers a text prompt with text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A model that looks at one image alongside an instruction.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn analyze(&self, image: &ImagePayload, prompt: &str) -> Result<VisionReply>;
}

/// Shared HTTP client with the per-call upper bound on wait time.
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}
