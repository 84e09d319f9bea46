//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use chroniclr_domain::{
    AdvanceDuration, AdvanceResult, CalendarConfigPatch, CooldownTickResult, GameClock,
    GameDateTime, GameId, Recurrence, ScheduledEvent, ScheduledEventId, StatusEffectTickResult,
};

use crate::app::App;
use crate::use_cases::calendar::CalendarError;
use crate::use_cases::events::{EventError, ScheduleEventParams};
use crate::use_cases::tickers::TickerError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/games/{id}/clock",
            put(establish_clock).get(get_clock),
        )
        .route("/api/games/{id}/clock/time", put(set_time))
        .route("/api/games/{id}/clock/advance", post(advance_time))
        .route(
            "/api/games/{id}/events",
            post(schedule_event).get(list_events),
        )
        .route("/api/events/{id}", delete(cancel_event))
        .route(
            "/api/games/{id}/status-effects/tick",
            post(tick_status_effects),
        )
        .route("/api/games/{id}/abilities/tick", post(tick_cooldowns))
        .route("/api/games/{id}", delete(purge_game))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Clock
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstablishClockRequest {
    #[serde(default)]
    calendar: CalendarConfigPatch,
    initial_time: Option<GameDateTime>,
}

async fn establish_clock(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<EstablishClockRequest>,
) -> Result<Json<GameClock>, ApiError> {
    let clock = app
        .use_cases
        .calendar
        .establish_calendar
        .execute(GameId::from_uuid(id), req.calendar, req.initial_time)
        .await?;
    Ok(Json(clock))
}

async fn get_clock(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameClock>, ApiError> {
    let clock = app
        .use_cases
        .calendar
        .get_clock
        .execute(GameId::from_uuid(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(clock))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetTimeRequest {
    time: GameDateTime,
}

async fn set_time(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTimeRequest>,
) -> Result<Json<GameClock>, ApiError> {
    let clock = app
        .use_cases
        .calendar
        .set_time
        .execute(GameId::from_uuid(id), req.time)
        .await?;
    Ok(Json(clock))
}

async fn advance_time(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(duration): Json<AdvanceDuration>,
) -> Result<Json<AdvanceResult>, ApiError> {
    let result = app
        .use_cases
        .calendar
        .advance_time
        .execute(GameId::from_uuid(id), duration)
        .await?;
    Ok(Json(result))
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleEventRequest {
    name: String,
    description: Option<String>,
    trigger_time: GameDateTime,
    recurring: Option<Recurrence>,
    metadata: Option<serde_json::Value>,
}

async fn schedule_event(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScheduleEventRequest>,
) -> Result<Json<ScheduledEvent>, ApiError> {
    let event = app
        .use_cases
        .events
        .schedule_event
        .execute(
            GameId::from_uuid(id),
            ScheduleEventParams {
                name: req.name,
                description: req.description,
                trigger_time: req.trigger_time,
                recurring: req.recurring,
                metadata: req.metadata,
            },
        )
        .await?;
    Ok(Json(event))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEventsQuery {
    #[serde(default)]
    include_triggered: bool,
}

async fn list_events(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<ScheduledEvent>>, ApiError> {
    let events = app
        .use_cases
        .events
        .list_events
        .execute(GameId::from_uuid(id), query.include_triggered)
        .await?;
    Ok(Json(events))
}

async fn cancel_event(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, ApiError> {
    let deleted = app
        .use_cases
        .events
        .cancel_event
        .execute(ScheduledEventId::from_uuid(id))
        .await?;
    if deleted {
        Ok(axum::http::StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

// =============================================================================
// Round tickers
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickRequest {
    #[serde(default = "default_rounds")]
    rounds: i64,
}

fn default_rounds() -> i64 {
    1
}

async fn tick_status_effects(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<TickRequest>,
) -> Result<Json<StatusEffectTickResult>, ApiError> {
    let result = app
        .use_cases
        .tickers
        .tick_status_effects
        .execute(GameId::from_uuid(id), req.rounds)
        .await?;
    Ok(Json(result))
}

async fn tick_cooldowns(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<TickRequest>,
) -> Result<Json<CooldownTickResult>, ApiError> {
    let result = app
        .use_cases
        .tickers
        .tick_cooldowns
        .execute(GameId::from_uuid(id), req.rounds)
        .await?;
    Ok(Json(result))
}

// =============================================================================
// Management
// =============================================================================

async fn purge_game(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, ApiError> {
    app.use_cases
        .management
        .purge_game
        .execute(GameId::from_uuid(id))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

// =============================================================================
// Errors
// =============================================================================

pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(e: CalendarError) -> Self {
        match e {
            CalendarError::NotInitialized => ApiError::NotFound,
            CalendarError::Validation(e) => ApiError::BadRequest(e.to_string()),
            CalendarError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<EventError> for ApiError {
    fn from(e: EventError) -> Self {
        match e {
            EventError::ClockNotInitialized => ApiError::NotFound,
            EventError::Validation(e) => ApiError::BadRequest(e.to_string()),
            EventError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<TickerError> for ApiError {
    fn from(e: TickerError) -> Self {
        match e {
            TickerError::Validation(e) => ApiError::BadRequest(e.to_string()),
            TickerError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}
