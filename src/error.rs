// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error covering the token, policy and store failure paths.
///
/// Several rejection outcomes deliberately answer with a success status and
/// a message body only (the storefront client inspects the body, not the
/// status code): a missing token and both seller-policy rejections are soft
/// failures, not HTTP errors.
#[derive(Debug)]
pub enum ApiError {
    // 200 OK with a message body (soft rejections, kept for client compatibility)
    MissingToken,
    Forbidden,
    AccountPending,

    // 400 Bad Request
    BadRequest(String),

    // 403 Forbidden
    InvalidToken,

    // 500 Internal Server Error
    Store(mongodb::error::Error),
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::OK,
            ApiError::Forbidden => StatusCode::OK,
            ApiError::AccountPending => StatusCode::OK,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::MissingToken => "No token found",
            ApiError::Forbidden => "Forbidden access",
            ApiError::AccountPending => "Your account is pending to add product",
            ApiError::BadRequest(msg) => msg,
            ApiError::InvalidToken => "Invalid Token",
            ApiError::Store(_) => "An error occurred while processing your request",
            ApiError::Internal(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        // Log the real error but return a generic message
        tracing::error!("MongoDB error: {}", err);
        ApiError::Store(err)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
