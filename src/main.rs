use config::{cors::init_cors, logger::initialize_logger, settings::Settings, startup::AppState};
use tracing::info;

mod app;
mod config;
mod controllers;
mod dtos;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    initialize_logger();

    info!("🚀 Server starting initialization...");

    let settings = Settings::from_env()?;

    // Initialize App State
    let app_state = AppState::from_settings(&settings).await?;

    let app = app::create_app(app_state).layer(init_cors(&settings.cors_origin)?);

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server started successfully at {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
