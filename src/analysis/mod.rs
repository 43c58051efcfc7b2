//! Photo health screening: store the upload, ask the vision model, shape
//! its reply into an [`AnalysisEnvelope`].

pub mod media;
pub mod report;
pub mod upload;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::consts::NOT_A_DOG_MESSAGE;
use crate::parse::extract_json_island;
use crate::prompts::DISEASE_SCREENING_PROMPT;
use crate::provider::{ImagePayload, VisionModel, VisionReply};

pub use report::{AnalysisEnvelope, CareInfo, DiseaseAnalysis, DogReport, Notes};
use upload::TempUpload;

/// An image as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Rejected before touching disk or the provider.
    #[error(
        "unsupported file type: {0}. Allowed: {allowed}",
        allowed = media::ACCEPTED_CONTENT_TYPES.join(", ")
    )]
    UnsupportedMediaType(String),
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

pub struct DiseaseScreener {
    vision: Arc<dyn VisionModel>,
    upload_dir: PathBuf,
}

impl DiseaseScreener {
    pub fn new(vision: Arc<dyn VisionModel>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            vision,
            upload_dir: upload_dir.into(),
        }
    }

    /// Screen one photo. Provider-side refusals and unreadable replies come
    /// back as `success: false` envelopes; only local failures (I/O,
    /// network, timeout) are errors.
    pub async fn screen(&self, image: UploadedImage) -> Result<AnalysisEnvelope, ScreeningError> {
        if !media::is_accepted(&image.content_type) {
            return Err(ScreeningError::UnsupportedMediaType(image.content_type));
        }
        Ok(self.screen_accepted(&image).await?)
    }

    async fn screen_accepted(&self, image: &UploadedImage) -> Result<AnalysisEnvelope> {
        let upload =
            TempUpload::write(&self.upload_dir, image.file_name.as_deref(), &image.bytes).await?;

        let payload = ImagePayload {
            media_type: media::media_type_for(upload.path()),
            data: upload.read_base64().await?,
        };
        tracing::info!(
            media_type = payload.media_type,
            bytes = image.bytes.len(),
            "screening photo"
        );

        let reply = self
            .vision
            .analyze(&payload, DISEASE_SCREENING_PROMPT)
            .await?;
        Ok(shape_reply(reply))
    }
}

/// Map a provider reply onto the response contract.
pub fn shape_reply(reply: VisionReply) -> AnalysisEnvelope {
    let text = match reply {
        VisionReply::Rejected { status, body } => {
            return AnalysisEnvelope::failure(
                format!("provider request failed: {}", status),
                Some(body),
            );
        }
        VisionReply::Text(text) => text,
    };

    let value = match extract_json_island(&text) {
        Ok(value) => value,
        Err(unparsed) => {
            tracing::warn!(reason = unparsed.reason, "vision reply had no usable JSON");
            return AnalysisEnvelope::failure(unparsed.reason, Some(unparsed.raw_text));
        }
    };

    match DiseaseAnalysis::from_value(value) {
        Ok(DiseaseAnalysis::Dog(report)) => AnalysisEnvelope::success(report),
        Ok(DiseaseAnalysis::NotDog { message }) => {
            AnalysisEnvelope::not_a_dog(message.unwrap_or_else(|| NOT_A_DOG_MESSAGE.to_string()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "vision reply did not match the analysis shape");
            AnalysisEnvelope::failure("unexpected analysis shape", Some(text))
        }
    }
}
