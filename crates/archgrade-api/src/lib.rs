//! archgrade API /v1: REST endpoints
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use archgrade_engine::Evaluator;
use archgrade_llm::{Decomposer, Explainer, ProviderChain};
use archgrade_quality::ScoringProfile;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use metrics::ApiMetrics;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<Evaluator>,
    pub decomposer: Decomposer,
    pub explainer: Explainer,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new(profile: ScoringProfile, providers: Arc<ProviderChain>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            evaluator: Arc::new(Evaluator::new(profile)),
            decomposer: Decomposer::new(providers.clone()),
            explainer: Explainer::new(providers),
            metrics: Arc::new(ApiMetrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/analyze", post(handlers::analyze))
        .route("/v1/simulate", post(handlers::simulate))
        .route("/v1/profile", get(handlers::profile))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("archgrade API listening on {}", addr);
    axum::serve(listener, app).await
}
