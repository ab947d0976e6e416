/*
 * Responsibility
 * - URL surface of the gate: the invocation endpoint and a liveness probe.
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{health::health, invoke::invoke};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/invoke", post(invoke))
}
