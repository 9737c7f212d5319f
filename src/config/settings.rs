use std::{env, net::SocketAddr};

use crate::error::{AppError, AppResult};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 9000;
const DEFAULT_DATABASE_NAME: &str = "polls";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8000";

/// Runtime configuration read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Without a URI the service falls back to the in-memory store.
    pub mongo_uri: Option<String>,
    pub database_name: String,
    /// Without a token the admin API is not mounted.
    pub admin_token: Option<String>,
    pub cors_origin: String,
}

impl Settings {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Configuration(format!("PORT must be a valid number, got {port}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongo_uri: get("MONGO_URI"),
            database_name: get("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            admin_token: get("ADMIN_TOKEN"),
            cors_origin: get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        })
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid HOST: {}", self.host)))
    }
}
