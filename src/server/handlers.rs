use super::types::{ErrorKind, ErrorResponse, HealthResponse};
use crate::{
    Error,
    qa::{QaAnswer, QaModel, QaRequest},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn QaModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn QaModel>) -> Self {
        Self { model }
    }
}

pub async fn answer_question(
    State(state): State<AppState>,
    payload: Result<Json<QaRequest>, JsonRejection>,
) -> Result<Json<QaAnswer>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request {}: {}", request_id, rejection.body_text());
        rejection_response(&rejection)
    })?;

    let input = request.into_input().map_err(|e| {
        warn!("Rejected request {}: {}", request_id, e);
        error_response(&e)
    })?;

    info!(
        "Answering request {} ({} chars of context)",
        request_id,
        input.context.chars().count()
    );

    match state.model.answer(&input).await {
        Ok(answer) => {
            info!(
                "Answered request {} with span [{}, {}) score {:.4}",
                request_id, answer.start, answer.end, answer.score
            );
            Ok(Json(answer))
        }
        Err(e) => {
            error!("Failed to answer request {}: {}", request_id, e);
            Err(error_response(&e))
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.name().to_string(),
    })
}

fn error_response(e: &Error) -> ApiError {
    if e.is_client_error() {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: ErrorKind::BadRequest,
                message: e.to_string(),
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: ErrorKind::InternalError,
                message: format!("Processing error: {}", e),
            }),
        )
    }
}

fn rejection_response(rejection: &JsonRejection) -> ApiError {
    let (status, kind) = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        (StatusCode::PAYLOAD_TOO_LARGE, ErrorKind::PayloadTooLarge)
    } else {
        (StatusCode::BAD_REQUEST, ErrorKind::BadRequest)
    };

    (
        status,
        Json(ErrorResponse {
            error: kind,
            message: rejection.body_text(),
        }),
    )
}
