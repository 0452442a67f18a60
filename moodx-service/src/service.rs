use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use moodx::{CompletionClient, GroqClient, MoodError, MoodRequest, Recommender, parse};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info};
use uuid::Uuid;

use crate::models::{ParseRequest, ParseResponse, RecommendRequest, RecommendResponse};
use crate::render::render_tabs;

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: &str, details: &str) -> ApiError {
    (
        status,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

/// Map a pipeline failure to an HTTP error. No recommendation data is ever
/// attached.
fn pipeline_error(e: &MoodError) -> ApiError {
    let details = e.to_string();
    match e {
        MoodError::Api { .. } | MoodError::Network(_) | MoodError::MalformedResponse(_) => {
            error_response(StatusCode::BAD_GATEWAY, "Completion endpoint failed", &details)
        }
        MoodError::InvalidRequest(_) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid request", &details)
        }
        MoodError::Config(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Service misconfigured",
            &details,
        ),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            recommender: Recommender::new(client),
        }
    }

    pub fn from_config(config: &moodx::Config) -> Self {
        Self::new(Arc::new(GroqClient::from_config(config)))
    }
}

/// Tag every request with a correlation id and run it inside a span.
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();
    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }
    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/recommend", post(recommend))
        .route("/parse", post(parse_raw))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "MoodX Machina",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Mood-aware recommendations across movies, songs, products, games, articles, social ideas, travel and food",
        "endpoints": {
            "POST /recommend": "Analyze a mood description and generate recommendations",
            "POST /parse": "Parse raw completion text into recommendation tabs",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> ApiResult<RecommendResponse> {
    let request_id = Uuid::new_v4().to_string();
    info!(
        request_id = %request_id,
        language = %request.language,
        include_products = request.include_products,
        "Received recommendation request"
    );

    let mood_request = MoodRequest {
        text: request.text.clone(),
        preferences: request.preferences(),
        with_advisors: request.include_advisors,
    };

    let outcome = state
        .recommender
        .recommend(&mood_request)
        .await
        .map_err(|e| {
            error!(request_id = %request_id, error = %e, "Recommendation run failed");
            pipeline_error(&e)
        })?;

    let tabs = render_tabs(&outcome.recommendations);
    Ok(Json(RecommendResponse {
        request_id,
        mood: outcome.mood,
        context: outcome.context,
        preferences: outcome.preferences,
        recommendations: outcome.recommendations,
        tabs,
        advisors: outcome.advisors,
        raw: request.include_raw.then_some(outcome.raw),
    }))
}

async fn parse_raw(Json(request): Json<ParseRequest>) -> Json<ParseResponse> {
    let recommendations = parse(&request.raw);
    info!(
        items = recommendations.total_items(),
        "Parsed caller-supplied completion text"
    );
    let tabs = render_tabs(&recommendations);
    Json(ParseResponse {
        recommendations,
        tabs,
    })
}
