use crate::catalog::{PortalServiceError, RepositoryError, RosterImportError, SeedError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Seed(SeedError),
    Roster(RosterImportError),
    Portal(PortalServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Seed(err) => write!(f, "seed error: {}", err),
            AppError::Roster(err) => write!(f, "roster import error: {}", err),
            AppError::Portal(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Seed(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::Portal(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Portal(PortalServiceError::Draft(_)) => StatusCode::BAD_REQUEST,
            AppError::Portal(
                PortalServiceError::PrivilegeNotFound(_)
                | PortalServiceError::StudentNotFound(_)
                | PortalServiceError::StaffNotFound(_),
            ) => StatusCode::NOT_FOUND,
            AppError::Portal(PortalServiceError::Repository(RepositoryError::Conflict(_))) => {
                StatusCode::CONFLICT
            }
            AppError::Seed(_) | AppError::Roster(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Portal(PortalServiceError::Repository(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SeedError> for AppError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Roster(value)
    }
}

impl From<PortalServiceError> for AppError {
    fn from(value: PortalServiceError) -> Self {
        Self::Portal(value)
    }
}
