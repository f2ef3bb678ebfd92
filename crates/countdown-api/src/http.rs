use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use countdown_model::{Seconds, TimerId, TimerInfo, TimerQuery, TimerSpec, TimerStatus};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::{error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /api/v1/timers - Create (and by default start) a timer
    /// - GET /api/v1/timers - List timers (optional status/limit/offset)
    /// - GET /api/v1/timers/{id} - Timer snapshot
    /// - POST /api/v1/timers/{id}/start - Start a created timer
    /// - POST /api/v1/timers/{id}/cancel - Request cancellation
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/timers", post(create_timer::<H>).get(list_timers::<H>))
            .route("/api/v1/timers/{id}", get(get_timer::<H>))
            .route("/api/v1/timers/{id}/start", post(start_timer::<H>))
            .route("/api/v1/timers/{id}/cancel", post(cancel_timer::<H>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct CreateTimerRequest {
    minutes: f64,
    #[serde(default = "default_autostart")]
    autostart: bool,
}

fn default_autostart() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateTimerResponse {
    id: TimerId,
    status: TimerStatus,
    remaining_seconds: Seconds,
}

#[derive(Debug, Deserialize)]
struct ListTimersParams {
    /// Filter by timer status
    status: Option<String>,
    /// Max items per page (default 100, max 1000)
    limit: Option<usize>,
    /// Offset for pagination (default 0)
    offset: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListTimersResponse {
    timers: Vec<TimerInfo>,
    total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct CancelTimerResponse {
    id: TimerId,
    cancelled: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/timers
async fn create_timer<H>(
    State(handler): State<Arc<H>>,
    payload: Result<Json<CreateTimerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let Json(req) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    debug!(minutes = req.minutes, autostart = req.autostart, "creating timer");

    let info = handler
        .create_timer(TimerSpec::minutes(req.minutes), req.autostart)
        .await?;

    let response = CreateTimerResponse {
        id: info.id,
        status: info.status,
        remaining_seconds: info.remaining_seconds,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/timers
///
/// Query params (all optional, combinable):
/// - ?status=running - filter by status
/// - ?limit=50       - max items per page (default 100, max 1000)
/// - ?offset=0       - pagination offset (default 0)
async fn list_timers<H>(
    State(handler): State<Arc<H>>,
    params: Result<Query<ListTimersParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let Query(params) = params.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let mut query = TimerQuery::new();

    if let Some(status) = params.status {
        let status = status
            .parse::<TimerStatus>()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        query = query.with_status(status);
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }
    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    let page = handler.query_timers(query).await?;
    debug!(count = page.items.len(), total = page.total, "timers listed");

    Ok(Json(ListTimersResponse {
        timers: page.items,
        total: page.total,
    }))
}

/// GET /api/v1/timers/{id}
async fn get_timer<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let timer_id = TimerId::from(id);
    let info = handler
        .get_timer(&timer_id)
        .await?
        .ok_or_else(|| ApiError::TimerNotFound(timer_id.to_string()))?;

    Ok(Json(info))
}

/// POST /api/v1/timers/{id}/start
async fn start_timer<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let timer_id = TimerId::from(id);
    let info = handler.start_timer(&timer_id).await?;
    debug!(%timer_id, "timer started via api");

    Ok((StatusCode::ACCEPTED, Json(info)))
}

/// POST /api/v1/timers/{id}/cancel
async fn cancel_timer<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let timer_id = TimerId::from(id);
    if !handler.cancel_timer(&timer_id).await? {
        return Err(ApiError::TimerNotFound(timer_id.to_string()));
    }
    debug!(%timer_id, "timer cancel requested via api");

    Ok(Json(CancelTimerResponse {
        id: timer_id,
        cancelled: true,
    }))
}
