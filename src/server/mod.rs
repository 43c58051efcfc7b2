//! HTTP surface: routes, shared state, and the serve loop.

pub mod handlers;
pub mod middleware;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analysis::DiseaseScreener;
use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::provider::anthropic::AnthropicVision;
use crate::provider::gemini::GeminiClient;
use crate::provider::{TextModel, VisionModel};
use crate::recommend::BreedAdvisor;

/// Read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<BreedAdvisor>,
    pub screener: Arc<DiseaseScreener>,
    pub verifier: Arc<JwtVerifier>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wire the given models to the rest of the configuration.
    pub fn new(config: &Config, text: Arc<dyn TextModel>, vision: Arc<dyn VisionModel>) -> Self {
        Self {
            advisor: Arc::new(BreedAdvisor::new(text, config.catalog.clone())),
            screener: Arc::new(DiseaseScreener::new(vision, &config.upload_dir)),
            verifier: Arc::new(JwtVerifier::new(&config.jwt_secret)),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Build the real provider clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let text = GeminiClient::new(
            &config.gemini_base_url,
            &config.text_model,
            config.gemini_api_key.clone(),
            config.provider_timeout,
        )
        .context("failed to build Gemini client")?;
        let vision = AnthropicVision::new(
            &config.anthropic_base_url,
            &config.vision_model,
            &config.anthropic_api_key,
            config.provider_timeout,
        )
        .context("failed to build Anthropic client")?;

        Ok(Self::new(config, Arc::new(text), Arc::new(vision)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/suggest/breed", post(handlers::suggest_breed))
        .route("/v1/analyze", post(handlers::analyze))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_bearer,
        ))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open policy: any origin, method and header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: Config) -> Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("failed to create upload dir {}", config.upload_dir.display()))?;

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; breed suggestions will fail until it is");
    }

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        text_model = %config.text_model,
        vision_model = %config.vision_model,
        breeds = config.catalog.len(),
        upload_dir = %config.upload_dir.display(),
        "kennel listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
