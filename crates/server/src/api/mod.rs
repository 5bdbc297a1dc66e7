use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use ledger::EXAMPLE_SEQUENCE;
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{
        ApplyNumberRequest, ApplyNumberResponse, HealthResponse, MessageResponse, NumbersResponse,
        ReplayResponse,
    },
};
use tracing::warn;

use crate::app_state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

pub(crate) async fn list_numbers(State(state): State<Arc<AppState>>) -> Json<NumbersResponse> {
    Json(NumbersResponse {
        list: state.ledger.snapshot().into(),
    })
}

pub(crate) async fn apply_number(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<ApplyNumberResponse> {
    let req = parse_number_request(body).map_err(error_response)?;
    let (action, updated) = state.ledger.apply(req.value);
    Ok(Json(ApplyNumberResponse {
        input: req.value,
        action: action.to_string(),
        updated: updated.into(),
    }))
}

pub(crate) async fn reset(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.ledger.reset();
    Json(MessageResponse {
        message: "state cleared".into(),
    })
}

pub(crate) async fn run_example(State(state): State<Arc<AppState>>) -> Json<ReplayResponse> {
    Json(state.ledger.replay(&EXAMPLE_SEQUENCE).into())
}

// The body is parsed as JSON whatever the declared content type.
fn parse_number_request(
    body: Result<Bytes, BytesRejection>,
) -> Result<ApplyNumberRequest, ApiException> {
    let bytes = body.map_err(|rejection| {
        warn!(%rejection, "failed to read number payload");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiException::new(ErrorCode::PayloadTooLarge, rejection.body_text())
        } else {
            ApiException::invalid_number_body()
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|error| {
        warn!(%error, "rejected number payload");
        ApiException::invalid_number_body()
    })
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
    };
    (status, Json(err.into()))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
