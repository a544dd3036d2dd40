use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cutlist_core::{Allocation, CutListInput, CutPlan, CutlistError, Planner, StrategyKind};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Cutlist</title>
</head>
<body>
    <h1>Cutlist API</h1>
    <h2>API Endpoints:</h2>
    <ul>
        <li>GET /api/health - Health check</li>
        <li>POST /api/plan - Plan cuts with both strategies</li>
        <li>POST /api/plan/global - Plan for the fewest boards</li>
        <li>POST /api/plan/grouped - Plan keeping parts together</li>
    </ul>
</body>
</html>"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Cutlist API");

    let addr = std::env::var("CUTLIST_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);

    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/health", get(health_check))
        .route("/api/plan", post(plan))
        .route("/api/plan/:strategy", post(plan_with))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "cutlist-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Runs both strategies on the submitted cut list
async fn plan(Json(input): Json<CutListInput>) -> Result<Json<CutPlan>, AppError> {
    info!(
        "Received cut list with {} parts and {} ungrouped cuts",
        input.parts.len(),
        input.cuts.len()
    );

    let planner = Planner::new(input)?;
    let result = planner.plan()?;

    info!(
        "Planning complete: {} boards global, {} boards grouped",
        result.global.summary.total_boards, result.grouped.summary.total_boards
    );

    Ok(Json(result))
}

/// Runs a single strategy
async fn plan_with(
    Path(strategy): Path<StrategyKind>,
    Json(input): Json<CutListInput>,
) -> Result<Json<Allocation>, AppError> {
    info!("Received {:?} plan request", strategy);

    let planner = Planner::new(input)?;
    let result = planner.allocate(strategy)?;

    info!(
        "Planning complete: {} boards, {:.2}% waste",
        result.summary.total_boards, result.summary.waste_percentage
    );

    Ok(Json(result))
}

/// Application error type
struct AppError(anyhow::Error);

impl From<CutlistError> for AppError {
    fn from(err: CutlistError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<CutlistError>() {
            Some(err) if err.is_user_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

async fn serve_index() -> impl IntoResponse {
    Html(INDEX_HTML)
}
