#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use clap::Parser;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use kennel::config::{Args, Config};
use kennel::provider::{TextModel, VisionModel};
use kennel::server::{AppState, router};

pub const SECRET: &str = "integration-test-secret";

/// Config pointing uploads at `upload_dir`, plus any extra flags.
pub fn config(upload_dir: &Path, extra: &[&str]) -> Config {
    let mut argv = vec![
        "kennel",
        "--anthropic-api-key",
        "sk-ant-test",
        "--jwt-secret",
        SECRET,
        "--upload-dir",
        upload_dir.to_str().unwrap(),
        "--breeds",
        "Pomeranian,Doberman,Shiba Inu",
    ];
    argv.extend_from_slice(extra);
    let args = Args::try_parse_from(argv).unwrap();
    Config::from_args(args).unwrap()
}

pub fn app(upload_dir: &Path, text: Arc<dyn TextModel>, vision: Arc<dyn VisionModel>) -> Router {
    app_with(upload_dir, &[], text, vision)
}

pub fn app_with(
    upload_dir: &Path,
    extra: &[&str],
    text: Arc<dyn TextModel>,
    vision: Arc<dyn VisionModel>,
) -> Router {
    let config = config(upload_dir, extra);
    router(AppState::new(&config, text, vision))
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn token_with(secret: &str, exp: u64) -> String {
    encode(
        &Header::default(),
        &json!({"sub": "tester", "exp": exp}),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// A valid token for the next hour.
pub fn token() -> String {
    token_with(SECRET, now() + 3600)
}

pub fn expired_token() -> String {
    token_with(SECRET, now() - 3600)
}

pub fn bearer() -> String {
    format!("Bearer {}", token())
}

pub fn survey_json() -> Value {
    json!({
        "job": "office worker",
        "home": "small apartment",
        "ownership": "first dog",
        "personality": "quiet",
        "family_type": "single",
        "dog_size": "small",
        "activity_rate": "low"
    })
}

pub fn suggest_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/suggest/breed")
        .header(header::AUTHORIZATION, bearer())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "kennel-test-boundary";

/// A multipart body with one `file` field.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn analyze_request(file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    analyze_request_with_field("file", file_name, content_type, bytes)
}

pub fn analyze_request_with_field(
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/analyze")
        .header(header::AUTHORIZATION, bearer())
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, file_name, content_type, bytes)))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Number of entries in a directory.
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
