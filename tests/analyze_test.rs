mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use kennel::consts::{DISCLAIMER, NOT_A_DOG_MESSAGE};
use kennel::provider::VisionReply;
use kennel::provider::mock::{MockTextModel, MockVisionModel};

use common::{
    analyze_request, analyze_request_with_field, app, app_with, bearer, file_count, json_body,
};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

async fn analyze_with(
    vision: MockVisionModel,
    request: axum::http::Request<axum::body::Body>,
) -> (StatusCode, Value, Arc<MockVisionModel>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let vision = Arc::new(vision.observing(dir.path()));
    let text = Arc::new(MockTextModel::new(vec![]));
    let response = app(dir.path(), text, vision.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response).await, vision, dir)
}

#[tokio::test]
async fn dog_photo_yields_report_and_disclaimer() {
    let reply = r#"Here is my analysis:
{"is_dog": true, "disease": "hot spot", "info": {"symptoms": ["red patch", "licking"], "recommendations": "keep the area dry", "vet_visit_required": true, "severity": "medium"}}
Hope this helps."#;

    let (status, body, vision, dir) = analyze_with(
        MockVisionModel::text(reply),
        analyze_request("buddy.PNG", "image/png", PNG_BYTES),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["disclaimer"], DISCLAIMER);
    assert_eq!(body["data"]["disease"], "hot spot");
    assert_eq!(body["data"]["info"]["symptoms"][1], "licking");
    assert_eq!(body["data"]["info"]["vet_visit_required"], true);

    let seen = vision.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].media_type, "image/png");
    assert!(!seen[0].data.is_empty());

    // The upload existed while the model looked at it and is gone now.
    assert_eq!(vision.files_during_call(), vec![1]);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn non_dog_photo_is_reported() {
    let (status, body, _, dir) = analyze_with(
        MockVisionModel::text(r#"{"is_dog": false, "message": "This is a cat."}"#),
        analyze_request("cat.jpg", "image/jpeg", b"jpeg"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "not a dog image");
    assert_eq!(body["message"], "This is a cat.");
    assert!(body.get("disclaimer").is_none());
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn non_dog_without_message_gets_default() {
    let (_, body, _, _) = analyze_with(
        MockVisionModel::text(r#"{"is_dog": false}"#),
        analyze_request("cat.jpg", "image/jpeg", b"jpeg"),
    )
    .await;

    assert_eq!(body["message"], NOT_A_DOG_MESSAGE);
}

#[tokio::test]
async fn unsupported_type_never_reaches_provider() {
    let (status, body, vision, dir) = analyze_with(
        MockVisionModel::text("{}"),
        analyze_request("notes.txt", "text/plain", b"hello"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("text/plain"));
    assert_eq!(vision.calls(), 0);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn provider_rejection_is_reported_in_body() {
    let (status, body, _, dir) = analyze_with(
        MockVisionModel::new(vec![VisionReply::Rejected {
            status: 529,
            body: r#"{"type":"error","error":{"type":"overloaded_error"}}"#.into(),
        }]),
        analyze_request("dog.webp", "image/webp", b"webp"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "provider request failed: 529");
    assert!(body["details"].as_str().unwrap().contains("overloaded_error"));
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn prose_reply_keeps_raw_text() {
    let (status, body, _, _) = analyze_with(
        MockVisionModel::text("Sorry, the image is too blurry to judge."),
        analyze_request("dog.jpg", "image/jpeg", b"jpeg"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "no JSON object found");
    assert_eq!(body["details"], "Sorry, the image is too blurry to judge.");
}

#[tokio::test]
async fn provider_error_is_500_and_cleans_up() {
    let (status, body, vision, dir) = analyze_with(
        MockVisionModel::failing("operation timed out"),
        analyze_request("dog.jpg", "image/jpeg", b"jpeg"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "analysis failed");
    assert!(body["details"].as_str().unwrap().contains("timed out"));
    assert_eq!(vision.files_during_call(), vec![1]);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn missing_file_field_is_400() {
    let (status, body, vision, _) = analyze_with(
        MockVisionModel::text("{}"),
        analyze_request_with_field("photo", "dog.jpg", "image/jpeg", b"jpeg"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("file"));
    assert_eq!(vision.calls(), 0);
}

#[tokio::test]
async fn oversized_upload_is_413_before_disk_or_provider() {
    let dir = tempfile::tempdir().unwrap();
    let vision = Arc::new(MockVisionModel::text("{}").observing(dir.path()));
    let app = app_with(
        dir.path(),
        &["--max-upload-bytes", "1024"],
        Arc::new(MockTextModel::new(vec![])),
        vision.clone(),
    );

    let response = app
        .oneshot(analyze_request("big.jpg", "image/jpeg", &[0xAB; 4096]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json_body(response).await["detail"].is_string());
    assert_eq!(vision.calls(), 0);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn non_multipart_body_is_json_400() {
    let dir = tempfile::tempdir().unwrap();
    let vision = Arc::new(MockVisionModel::text("{}"));
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/analyze")
        .header(axum::http::header::AUTHORIZATION, bearer())
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"file": "dog.jpg"}"#))
        .unwrap();

    let response = app(dir.path(), Arc::new(MockTextModel::new(vec![])), vision.clone())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["detail"].is_string());
    assert_eq!(vision.calls(), 0);
}
