use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ImagePayload, VisionModel, VisionReply, http_client};

const API_PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Photo screening through the Anthropic Messages API.
pub struct AnthropicVision {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AnthropicVision {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_request<'a>(&'a self, image: &'a ImagePayload, prompt: &'a str) -> ApiRequest<'a> {
        ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [Message {
                role: "user",
                content: [
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: image.media_type,
                            data: &image.data,
                        },
                    },
                    ContentBlock::Text { text: prompt },
                ],
            }],
        }
    }
}

#[async_trait]
impl VisionModel for AnthropicVision {
    async fn analyze(&self, image: &ImagePayload, prompt: &str) -> Result<VisionReply> {
        let body = self.build_request(image, prompt);

        let resp = self
            .http
            .post(format!("{}{}", self.base_url, API_PATH))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Anthropic request failed")?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "Anthropic API rejected the request");
            return Ok(VisionReply::Rejected { status, body });
        }

        let api_resp: ApiResponse = resp
            .json()
            .await
            .context("failed to decode Anthropic response")?;

        if let Some(usage) = &api_resp.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "vision call finished"
            );
        }

        Ok(VisionReply::Text(api_resp.first_text()))
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: [ContentBlock<'a>; 2],
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    usage: Option<Usage>,
}

impl ApiResponse {
    /// Text of the first text block, or empty.
    fn first_text(self) -> String {
        self.content
            .into_iter()
            .find(|block| block.content_type == "text")
            .and_then(|block| block.text)
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}
