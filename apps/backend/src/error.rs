use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Wire shape for every JSON error the API returns.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No token provided")]
    UnauthorizedNoToken,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Token expired")]
    UnauthorizedExpiredToken,
    #[error("Invalid token")]
    UnauthorizedInvalidToken,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{detail}")]
    OAuth { detail: String },
    #[error("{detail}")]
    Db { detail: String },
    #[error("{detail}")]
    Config { detail: String },
    #[error("{detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnauthorizedNoToken
            | AppError::Unauthorized
            | AppError::UnauthorizedExpiredToken
            | AppError::UnauthorizedInvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::OAuth { .. }
            | AppError::Db { .. }
            | AppError::Config { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized_no_token() -> Self {
        Self::UnauthorizedNoToken
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn unauthorized_expired_token() -> Self {
        Self::UnauthorizedExpiredToken
    }

    pub fn unauthorized_invalid_token() -> Self {
        Self::UnauthorizedInvalidToken
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn method_not_allowed() -> Self {
        Self::MethodNotAllowed
    }

    pub fn oauth(detail: String) -> Self {
        Self::OAuth { detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        // Error detail is surfaced to the client as-is. Fine for this small
        // game backend; a bigger deployment would redact 500 bodies.
        HttpResponse::build(self.status())
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .json(ErrorBody {
                error: self.to_string(),
            })
    }
}
