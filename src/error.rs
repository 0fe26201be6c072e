use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{message, error?}`. The `error` field is only present
/// on 500s and carries the stringified underlying failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    error: None,
                },
            ),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    message,
                    error: None,
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message,
                    error: None,
                },
            ),
            ApiError::Internal { message, source } => {
                error!(error = %source, "internal error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message,
                        error: Some(source.to_string()),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_detail_when_absent() {
        let body = ErrorBody {
            message: "Cart item not found".into(),
            error: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"Cart item not found"}"#);
    }

    #[test]
    fn internal_error_carries_source_detail() {
        let err = ApiError::internal("Failed to register new user", anyhow::anyhow!("boom"));
        match err {
            ApiError::Internal { message, source } => {
                assert_eq!(message, "Failed to register new user");
                assert_eq!(source.to_string(), "boom");
            }
            _ => panic!("expected internal variant"),
        }
    }
}
