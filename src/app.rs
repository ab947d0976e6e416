/*
 * Responsibility
 * - Tracing init → Config load → dependency wiring → Router assembly
 * - axum::serve() startup
 */
use std::time::Duration;
use std::{panic, process};

use anyhow::Result;
use axum::{Router, error_handling::HandleErrorLayer};
use tower::{BoxError, ServiceBuilder, timeout::TimeoutLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::services::credentials;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,edge_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they don't get lost when stderr is
        // hidden by the launcher.
        tracing::error!(?info, "panic");

        // In development, fail fast. In production, keep serving and leave
        // the default stderr report in place.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> AppState {
    let provider = credentials::build_credential_provider(&config.credentials).await;
    AppState::new(provider)
}

fn build_router(state: AppState, config: &Config) -> Router {
    // The hosting environment bounds every invocation; locally that bound
    // is this timeout layer.
    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.invocation_timeout_seconds,
        )));

    api::routes()
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::InvocationTimeout
    } else {
        tracing::error!(error = %err, "middleware failure");
        AppError::Internal
    }
}
