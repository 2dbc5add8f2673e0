use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

/// Errors the auth middlewares surface to the client. Handler-level
/// failures keep the per-route JSON bodies instead of going through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    Unauthorized,
    Forbidden,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "unauthorized access"),
            AppError::Forbidden => write!(f, "forbidden access"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": true,
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_http_status() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn display_messages() {
        assert_eq!(AppError::Unauthorized.to_string(), "unauthorized access");
        assert_eq!(AppError::Forbidden.to_string(), "forbidden access");
    }
}
