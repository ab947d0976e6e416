/*
 * Responsibility
 * - tokio runtime entry
 * - delegate to app::run() (no logic here)
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod edge;
mod error;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
