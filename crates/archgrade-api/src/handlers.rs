//! API Handlers
use crate::error::ApiError;
use crate::AppState;
use archgrade_core::{
    normalize_record, normalize_simulation, ArchitectureRecord, EngineError, SimulationParams,
    ARCHGRADE_VERSION,
};
use archgrade_engine::EvaluationResult;
use archgrade_llm::EXPLANATION_UNAVAILABLE;
use archgrade_quality::ScoringProfile;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub architecture_summary: Option<Value>,
    #[serde(default)]
    pub simulation: Option<Value>,
}

/// Where the scored record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Structured,
    Description,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Structured => "structured",
            InputMode::Description => "description",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub input_mode: InputMode,
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub ai_explanation: String,
    /// Provider that decomposed the description
    pub ai_provider: Option<String>,
    /// Provider that wrote `ai_explanation`; may differ after a fallback
    pub explanation_provider: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let simulation = normalize_simulation(request.simulation.as_ref())?;

    if let Some(summary) = present(request.architecture_summary.as_ref()) {
        let record = normalize_record(summary)?;
        return Ok(Json(respond_structured(&state, &record, simulation.as_ref())));
    }

    let description = request
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| {
            EngineError::InvalidRequest(
                "either description or architecture_summary is required".to_string(),
            )
        })?;

    let decomposer = state.decomposer.clone();
    let decomposition = match run_blocking(move || decomposer.decompose(&description)).await {
        Ok(decomposition) => decomposition,
        Err(err) => {
            state.metrics.record_upstream_failure("decomposition");
            return Err(err.into());
        }
    };

    let result = state.evaluator.evaluate(&decomposition.record, simulation.as_ref());
    state
        .metrics
        .record_evaluation(result.maturity_level.label(), InputMode::Description.as_str());

    let snapshot = json!({
        "architecture": decomposition.record,
        "scores": result.scores,
        "risk_analysis": result.risk_analysis,
        "cost_analysis": result.cost_analysis,
    });
    let explainer = state.explainer.clone();
    let (ai_explanation, explanation_provider) =
        match run_blocking(move || explainer.explain(&snapshot).map_err(EngineError::from)).await {
            Ok(completion) => (completion.text, Some(completion.provider)),
            Err(err) => {
                warn!("Explanation failed: {err}");
                state.metrics.record_upstream_failure("explanation");
                (EXPLANATION_UNAVAILABLE.to_string(), None)
            }
        };

    Ok(Json(AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        input_mode: InputMode::Description,
        result,
        ai_explanation,
        ai_provider: Some(decomposition.provider),
        explanation_provider,
    }))
}

/// What-if run against an existing record
pub async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let summary = present(request.architecture_summary.as_ref()).ok_or_else(|| {
        EngineError::InvalidRequest("architecture_summary is required".to_string())
    })?;
    let simulation = normalize_simulation(request.simulation.as_ref())?
        .ok_or_else(|| EngineError::InvalidRequest("simulation is required".to_string()))?;

    let record = normalize_record(summary)?;
    Ok(Json(respond_structured(&state, &record, Some(&simulation))))
}

pub async fn profile(State(state): State<AppState>) -> Json<ScoringProfile> {
    Json(state.evaluator.profile().clone())
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": ARCHGRADE_VERSION })))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain")],
            err.to_string(),
        ),
    }
}

fn respond_structured(
    state: &AppState,
    record: &ArchitectureRecord,
    simulation: Option<&SimulationParams>,
) -> AnalyzeResponse {
    let result = state.evaluator.evaluate(record, simulation);
    state
        .metrics
        .record_evaluation(result.maturity_level.label(), InputMode::Structured.as_str());
    info!(overall = result.scores.overall, simulated = simulation.is_some(), "Structured evaluation");

    AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        input_mode: InputMode::Structured,
        result,
        ai_explanation: String::new(),
        ai_provider: None,
        explanation_provider: None,
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Run a blocking provider call off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T, EngineError>
where
    F: FnOnce() -> Result<T, EngineError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| EngineError::UpstreamUnavailable(format!("provider task failed: {err}")))?
}
