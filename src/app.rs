use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{
    config::startup::AppState,
    routes::{admin_route::admin_router, poll_route::poll_router},
};

/// Assembles the full router. The admin API is only mounted when a token is configured.
pub fn create_app(app_state: AppState) -> Router {
    let mut app = poll_router();
    if app_state.admin_token.is_some() {
        app = app.merge(admin_router());
    }

    app.layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
