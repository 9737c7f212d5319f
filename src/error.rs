use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Something's reeeeealy wrong, send hlp pls")]
    Unknown,

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Storage Errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    // Rendering Errors
    #[error("Template error: {0}")]
    TemplateError(String),

    // Admin access
    #[error("Authentication failed")]
    AuthenticationFailed,

    // Poll Errors
    #[error("Poll error: {0}")]
    Poll(#[from] PollsError),
}

#[derive(Error, Debug)]
pub enum PollsError {
    /// Covers both unknown identifiers and questions that are not eligible for display.
    #[error("Question not found")]
    QuestionNotFound,

    #[error("Choice not found")]
    ChoiceNotFound,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Choice {0} cannot take any more votes")]
    VoteLimitReached(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the interesting part in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        AppError::TemplateError(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_string = self.to_string();
        let (status, error_message) = match self {
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Misconfigured")
            }

            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database Error"),

            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed To Render Page")
            }

            AppError::AuthenticationFailed => (StatusCode::UNAUTHORIZED, "Authentication Failed"),

            AppError::Poll(poll_err) => match poll_err {
                PollsError::QuestionNotFound => (StatusCode::NOT_FOUND, "Question Not Found"),
                PollsError::ChoiceNotFound => (StatusCode::NOT_FOUND, "Choice Not Found"),
                PollsError::InvalidQuestion(_) => (StatusCode::BAD_REQUEST, "Invalid Question"),
                PollsError::InvalidChoice(_) => (StatusCode::BAD_REQUEST, "Invalid Choice"),
                PollsError::VoteLimitReached(_) => (StatusCode::CONFLICT, "Vote Limit Reached"),
            },

            AppError::Unknown => (StatusCode::INTERNAL_SERVER_ERROR, "Unknown Error"),
        };

        if status.is_server_error() {
            error!("Request failed:: {}", error_string);
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "message": error_message,
            "error": error_string,
            "timestamp": chrono::Utc::now()
        }));

        (status, body).into_response()
    }
}
