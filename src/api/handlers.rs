//! HTTP request handlers for the roster engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{ScheduleOutcome, ScheduleRequest};

use super::request::ScheduleRequestBody;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedule", post(schedule_handler))
        .with_state(state)
}

/// Handler for the POST /schedule endpoint.
///
/// Accepts a scheduling request and returns the solved schedule, or the
/// exhaustion outcome when no relaxation level yields a solution. The solve
/// itself runs on the blocking pool; a full relaxation cascade can take
/// multiple time budgets of wall-clock time.
async fn schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequestBody>, JsonRejection>,
) -> impl IntoResponse {
    // Correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let request: ScheduleRequest = body.into();
    let scheduler = state.scheduler().clone();
    let start_time = Instant::now();
    let solve = tokio::task::spawn_blocking(move || scheduler.solve(&request)).await;

    let result = match solve {
        Ok(result) => result,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Solve task panicked");
            let error = ApiError::new("INTERNAL_ERROR", "Schedule solve failed unexpectedly");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    match result {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            match &outcome {
                ScheduleOutcome::Solved(result) => info!(
                    correlation_id = %correlation_id,
                    relaxation_level = result.relaxation_level,
                    objective = result.objective,
                    duration_ms = duration.as_millis(),
                    "Schedule request completed"
                ),
                ScheduleOutcome::Exhausted { .. } => warn!(
                    correlation_id = %correlation_id,
                    duration_ms = duration.as_millis(),
                    "Schedule request exhausted all relaxation levels"
                ),
            }
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(outcome),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Schedule request rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}
