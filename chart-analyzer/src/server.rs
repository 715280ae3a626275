use crate::extractor::extract_indicators;
use crate::normalizer::{normalize_image, to_data_url};
use crate::pipeline::AnalysisPipeline;
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, AnalyzerConfig, ErrorBody, ErrorKind, PipelineOutcome, Result, UploadRequest,
    UploadResponse,
};
use crate::upload::{UploadStore, UPLOADS_ROUTE};
use crate::utils::body_limit;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const ANALYZE_ROUTE: &str = "/api/analyze-trading-image";
pub const UPLOAD_ROUTE: &str = "/api/upload";
pub const HEALTH_ROUTE: &str = "/health";

/// Shared, read-only state behind every request.
pub struct AppState {
    pub pipeline: AnalysisPipeline,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline, uploads: UploadStore) -> Self {
        Self { pipeline, uploads }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let pipeline = AnalysisPipeline::from_config(config.clone())?;
        Ok(Self::new(pipeline, UploadStore::new(&config.upload_dir)))
    }
}

pub fn build_router(state: Arc<AppState>, max_image_bytes: u64) -> Router {
    let uploads_dir = state.uploads.dir().to_path_buf();

    Router::new()
        .route(ANALYZE_ROUTE, post(analyze_trading_image))
        .route(UPLOAD_ROUTE, post(upload_image))
        .route(HEALTH_ROUTE, get(health))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(body_limit(max_image_bytes)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until ctrl-c.
pub async fn start_server(config: AnalyzerConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state, config.max_image_bytes);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Chart analyzer listening on http://{}", config.bind_addr);
    info!("Analysis endpoint: POST {}", ANALYZE_ROUTE);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Received shutdown signal, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::UpstreamHttp | ErrorKind::MalformedResponse | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn analyze_trading_image(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected analysis request body: {}", rejection);
            return (StatusCode::BAD_REQUEST, Json(AnalyzeResponse::failed("Invalid request body")));
        }
    };

    match state.pipeline.run(request.image.as_deref()).await {
        PipelineOutcome::Success(result) => {
            let indicators = extract_indicators(&result);
            let image_url = normalize_image(request.image.as_deref())
                .map(|payload| to_data_url(&payload))
                .unwrap_or_default();

            (
                StatusCode::OK,
                Json(AnalyzeResponse::succeeded(
                    result.analysis_text,
                    result.prediction_text,
                    image_url,
                    indicators,
                )),
            )
        }
        PipelineOutcome::Failure { kind, message } => (status_for(kind), Json(AnalyzeResponse::failed(message))),
    }
}

async fn upload_image(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<UploadRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected upload request body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match state.uploads.store(request.base64.as_deref()).await {
        Ok(url) => (StatusCode::OK, Json(UploadResponse { url })).into_response(),
        Err(e) if e.kind() == ErrorKind::Validation => {
            warn!("Upload error: {}", e);
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            warn!("Upload error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed")
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (status, Json(ErrorBody { error: error.to_string() })).into_response()
}
