use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::assessment::{run_assessment, AssessmentOutcome};
use crate::catalog::store::CatalogStore;
use crate::catalog::{AssessmentRecord, Category, DashboardStats, Policy};
use crate::config::Config;
use crate::profile::builder::{build_profile, ProfileOverrides};
use crate::profile::AssessmentProfile;
use crate::prominence::predictor::{select_predictor, Predictor};
use crate::prominence::scorer::score_prominence;
use crate::prominence::ProminenceResult;
use crate::recommend::engine::recommend_policies;
use crate::recommend::reasons::explain_recommendations;
use crate::recommend::{Explanation, PolicyRecommendations};

const FALLBACK_CUSTOMER: &str = "walk-in";

#[derive(Clone)]
struct ApiState {
    config: Config,
    predictor: Arc<dyn Predictor>,
    db_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Default, Deserialize)]
struct CommandContextRequest {
    customer: Option<String>,
    #[serde(default)]
    profile: ProfileOverrides,
}

#[derive(Debug, Clone)]
struct EffectiveContext {
    customer: String,
    profile: AssessmentProfile,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScoreRequest {
    #[serde(flatten)]
    context: CommandContextRequest,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RecommendRequest {
    #[serde(flatten)]
    context: CommandContextRequest,
    prominence_score: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ExplainRequest {
    #[serde(flatten)]
    context: CommandContextRequest,
    prominence_score: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
struct AssessRequest {
    #[serde(flatten)]
    context: CommandContextRequest,
    #[serde(default = "default_true")]
    persist_history: bool,
}

impl Default for AssessRequest {
    fn default() -> Self {
        Self {
            context: CommandContextRequest::default(),
            persist_history: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PoliciesQuery {
    category: Option<String>,
    government: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ProminentQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    customer: String,
    predictor: String,
    result: ProminenceResult,
}

#[derive(Debug, Serialize)]
struct RecommendResponse {
    customer: String,
    prominence_score: u8,
    government_policies: Vec<Policy>,
    private_policies: Vec<Policy>,
}

#[derive(Debug, Serialize)]
struct ExplainResponse {
    customer: String,
    prominence_score: u8,
    #[serde(flatten)]
    explanation: Explanation,
}

#[derive(Debug, Serialize)]
struct PoliciesResponse {
    policies: Vec<Policy>,
}

#[derive(Debug, Serialize)]
struct ProminentResponse {
    customers: Vec<AssessmentRecord>,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let db_path = config.resolved_db_path();
    let store = CatalogStore::open(&db_path)?;
    if config.catalog.seed_defaults {
        let seeded = store.seed_defaults()?;
        if seeded > 0 {
            info!("seeded {seeded} launch policies into {}", db_path.display());
        }
    }
    drop(store);

    let predictor = select_predictor(&config.resolved_model_path());
    let state = ApiState {
        config,
        predictor,
        db_path,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/v1/score", post(score))
        .route("/v1/recommend", post(recommend))
        .route("/v1/explain", post(explain))
        .route("/v1/assess", post(assess))
        .route("/v1/policies", get(policies))
        .route("/v1/prominent", get(prominent))
        .route("/v1/stats", get(stats))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn score(
    State(state): State<ApiState>,
    Json(request): Json<ScoreRequest>,
) -> ApiResult<ScoreResponse> {
    let effective = resolve_effective_context(&state, &request.context);
    let result = score_prominence(&effective.profile, state.predictor.as_ref());
    Ok(ok(ScoreResponse {
        customer: effective.customer,
        predictor: state.predictor.name().to_string(),
        result,
    }))
}

async fn recommend(
    State(state): State<ApiState>,
    Json(request): Json<RecommendRequest>,
) -> ApiResult<RecommendResponse> {
    let effective = resolve_effective_context(&state, &request.context);
    let prominence_score = request.prominence_score.unwrap_or_else(|| {
        score_prominence(&effective.profile, state.predictor.as_ref()).prominence_score
    });

    let store = open_store(&state)?;
    let catalog = store.list_policies().map_err(ApiError::internal)?;
    let PolicyRecommendations {
        government_policies,
        private_policies,
    } = recommend_policies(&effective.profile, prominence_score, &catalog);

    Ok(ok(RecommendResponse {
        customer: effective.customer,
        prominence_score,
        government_policies,
        private_policies,
    }))
}

async fn explain(
    State(state): State<ApiState>,
    Json(request): Json<ExplainRequest>,
) -> ApiResult<ExplainResponse> {
    let effective = resolve_effective_context(&state, &request.context);
    let prominence_score = request.prominence_score.unwrap_or_else(|| {
        score_prominence(&effective.profile, state.predictor.as_ref()).prominence_score
    });

    Ok(ok(ExplainResponse {
        customer: effective.customer,
        prominence_score,
        explanation: explain_recommendations(&effective.profile, prominence_score),
    }))
}

async fn assess(
    State(state): State<ApiState>,
    Json(request): Json<AssessRequest>,
) -> ApiResult<AssessmentOutcome> {
    let effective = resolve_effective_context(&state, &request.context);
    let store = open_store(&state)?;
    let catalog = store.list_policies().map_err(ApiError::internal)?;
    let outcome = run_assessment(&effective.profile, state.predictor.as_ref(), &catalog);

    if request.persist_history {
        store
            .record_assessment(&AssessmentRecord {
                customer_ref: outcome.customer.clone(),
                is_prominent: outcome.prominence.is_prominent,
                prominence_score: outcome.prominence.prominence_score,
                predictor: outcome.predictor.clone(),
                captured_at: Utc::now(),
            })
            .map_err(ApiError::internal)?;
    }

    Ok(ok(outcome))
}

async fn policies(
    State(state): State<ApiState>,
    Query(query): Query<PoliciesQuery>,
) -> ApiResult<PoliciesResponse> {
    let store = open_store(&state)?;
    let mut policies = match &query.category {
        Some(raw) => {
            let category =
                Category::from_str(raw).map_err(|error| ApiError::bad_request(error.to_string()))?;
            store
                .policies_by_category(&category)
                .map_err(ApiError::internal)?
        }
        None => store.list_policies().map_err(ApiError::internal)?,
    };
    if let Some(government) = query.government {
        policies.retain(|p| p.is_government_policy == government);
    }
    Ok(ok(PoliciesResponse { policies }))
}

async fn prominent(
    State(state): State<ApiState>,
    Query(query): Query<ProminentQuery>,
) -> ApiResult<ProminentResponse> {
    let limit = query.limit.unwrap_or(20).max(1);
    let store = open_store(&state)?;
    let customers = store.prominent_customers(limit).map_err(ApiError::internal)?;
    Ok(ok(ProminentResponse { customers }))
}

async fn stats(State(state): State<ApiState>) -> ApiResult<DashboardStats> {
    let store = open_store(&state)?;
    let stats = store.dashboard_stats().map_err(ApiError::internal)?;
    Ok(ok(stats))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn default_true() -> bool {
    true
}

fn open_store(state: &ApiState) -> std::result::Result<CatalogStore, ApiError> {
    CatalogStore::open(&state.db_path).map_err(ApiError::internal)
}

fn resolve_effective_context(state: &ApiState, context: &CommandContextRequest) -> EffectiveContext {
    let customer = context
        .customer
        .clone()
        .unwrap_or_else(|| state.config.customer.reference.clone());
    let customer = if customer.trim().is_empty() {
        FALLBACK_CUSTOMER.to_string()
    } else {
        customer
    };
    let profile = build_profile(&customer, &context.profile);
    EffectiveContext { customer, profile }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prominence::predictor::FormulaPredictor;

    fn state() -> ApiState {
        ApiState {
            config: Config::default(),
            predictor: Arc::new(FormulaPredictor),
            db_path: PathBuf::from(":memory:"),
        }
    }

    #[test]
    fn blank_customer_falls_back_to_walk_in() {
        let effective = resolve_effective_context(&state(), &CommandContextRequest::default());
        assert_eq!(effective.customer, FALLBACK_CUSTOMER);
        assert_eq!(effective.profile.customer_ref, FALLBACK_CUSTOMER);
    }

    #[test]
    fn request_customer_wins_over_config() {
        let mut test_state = state();
        test_state.config.customer.reference = "configured".to_string();
        let request = CommandContextRequest {
            customer: Some("cust-9".to_string()),
            profile: ProfileOverrides::default(),
        };
        let effective = resolve_effective_context(&test_state, &request);
        assert_eq!(effective.customer, "cust-9");
    }

    #[test]
    fn assess_request_persists_by_default() {
        let parsed: AssessRequest = serde_json::from_str("{}").expect("parse");
        assert!(parsed.persist_history);
        let parsed: AssessRequest =
            serde_json::from_str(r#"{"persist_history": false}"#).expect("parse");
        assert!(!parsed.persist_history);
    }
}
