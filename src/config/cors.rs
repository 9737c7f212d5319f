use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::CorsLayer;

use crate::error::{AppError, AppResult};

pub fn init_cors(origin: &str) -> AppResult<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|_| AppError::Configuration(format!("Invalid CORS origin: {origin}")))?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT])
        .allow_origin([origin]);

    Ok(cors)
}
