//! The invocation endpoint: one origin-request event in, one verdict out.

use axum::{Json, extract::State};

use crate::edge::event::{Event, Verdict};
use crate::edge::gate;
use crate::error::AppError;
use crate::state::AppState;

/// Mirrors the edge runtime callback: the body is the event, the payload of
/// the 200 is either the (sanitized) request to forward or the terminal 401
/// response for the CDN layer to serve.
///
/// A credential resolution failure is not an auth decision; it surfaces as
/// an invocation failure instead of a verdict.
pub async fn invoke(
    State(state): State<AppState>,
    Json(event): Json<Event>,
) -> Result<Json<Verdict>, AppError> {
    let request = event
        .into_request()
        .ok_or_else(|| AppError::BadRequest("event contains no request record".to_string()))?;

    let credentials = state.credentials.resolve().await.map_err(|err| {
        tracing::error!(
            error = %err,
            source = state.credentials.source_name(),
            "credential resolution failed"
        );
        AppError::from(err)
    })?;

    Ok(Json(gate::evaluate(&credentials, request)))
}
