use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use super::AppState;
use crate::analysis::{AnalysisEnvelope, ScreeningError, UploadedImage};
use crate::error::{ApiError, ApiResult};
use crate::recommend::{BreedSuggestion, SurveyForm};

/// Multipart field holding the photo.
const FILE_FIELD: &str = "file";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn suggest_breed(
    State(state): State<AppState>,
    Json(form): Json<SurveyForm>,
) -> ApiResult<Json<BreedSuggestion>> {
    match state.advisor.suggest(&form).await {
        Ok(Some(suggestion)) => {
            tracing::info!(breed = %suggestion.breed, "suggested breed");
            Ok(Json(suggestion))
        }
        Ok(None) => Err(ApiError::NoRecommendation),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "text provider call failed");
            Err(ApiError::Upstream(format!("{e:#}")))
        }
    }
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Response> {
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let image = read_image(multipart).await?;

    match state.screener.screen(image).await {
        Ok(envelope) => Ok(Json(envelope).into_response()),
        Err(e @ ScreeningError::UnsupportedMediaType(_)) => {
            Err(ApiError::UnsupportedMediaType(e.to_string()))
        }
        Err(ScreeningError::Failed(e)) => {
            let details = format!("{e:#}");
            tracing::error!(error = %details, "photo analysis failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalysisEnvelope::failure("analysis failed", Some(details))),
            )
                .into_response())
        }
    }
}

/// Pull the `file` field out of the form; other fields are skipped.
async fn read_image(mut multipart: Multipart) -> ApiResult<UploadedImage> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        return Ok(UploadedImage {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest(format!(
        "missing `{}` field in multipart form",
        FILE_FIELD
    )))
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}
