use crate::config::ConfigError;
use crate::rating::{CatalogError, ClaimServiceError, RateTableError};
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
    Json(serde_json::Error),
    RateTable(RateTableError),
    Catalog(CatalogError),
    Claim(ClaimServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid JSON payload: {}", err),
            AppError::RateTable(err) => write!(f, "rate table error: {}", err),
            AppError::Catalog(err) => write!(f, "condition catalog error: {}", err),
            AppError::Claim(err) => write!(f, "claim rejected: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::RateTable(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Claim(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Claim(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::RateTable(_)
            | AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
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

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RateTableError> for AppError {
    fn from(value: RateTableError) -> Self {
        Self::RateTable(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<ClaimServiceError> for AppError {
    fn from(value: ClaimServiceError) -> Self {
        Self::Claim(value)
    }
}

impl From<crate::rating::IntakeError> for AppError {
    fn from(value: crate::rating::IntakeError) -> Self {
        Self::Claim(ClaimServiceError::Intake(value))
    }
}
