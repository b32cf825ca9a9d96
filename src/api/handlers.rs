use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::models::{ForwardRequest, ForwardResponse, HealthResponse};
use crate::app_state::AppState;
use crate::error::Error;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model_name.clone(),
        layers: state.model.num_layers(),
        in_units: state.model.in_units(),
    })
}

pub async fn forward(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ForwardRequest>, JsonRejection>,
) -> Result<Json<ForwardResponse>, (StatusCode, String)> {
    // Bodies that do not decode as a numeric tensor are malformed input.
    let Json(payload) = payload
        .map_err(|rejection| error_response(Error::InvalidInput(rejection.body_text())))?;
    let input = payload.input.to_tensor(&state.device).map_err(error_response)?;
    tracing::info!(shape = ?input.dims(), "forward request");

    let output = state.model.forward(&input).map_err(error_response)?;
    let response = ForwardResponse::from_tensor(&output).map_err(error_response)?;

    tracing::info!(shape = ?response.shape, "forward response");
    Ok(Json(response))
}

fn error_response(err: Error) -> (StatusCode, String) {
    let status = match err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::ShapeMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(%status, error = %err, "forward failed");
    (status, err.to_string())
}
