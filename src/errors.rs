use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound,
    InternalServerError,
    Config(String),
    DatabaseError(sqlx::Error),
    MigrateError(sqlx::migrate::MigrateError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = match self {
            // 404 carries no body.
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::InternalServerError => "Internal server error",
            Self::Config(_) => "Configuration error",
            Self::DatabaseError(_) => "Database error",
            Self::MigrateError(_) => "Migration error",
        };

        let body = Json(json!({ "error": message }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "resource not found"),
            Self::InternalServerError => write!(f, "internal server error"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::DatabaseError(err) => write!(f, "database error: {err}"),
            Self::MigrateError(err) => write!(f, "migration error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {:?}", err);
        Self::DatabaseError(err)
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        error!("Migration error: {:?}", err);
        Self::MigrateError(err)
    }
}
