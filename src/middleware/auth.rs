use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Authenticated identity extracted from a verified token.
///
/// The email is optional because the authentication endpoint signs whatever
/// it is posted; an identity without an email fails the seller check the
/// same way an unknown email does.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email().map(str::to_string),
        }
    }
}

/// Token verification middleware.
///
/// A request with no Authorization header at all is answered with a soft
/// rejection (200 + "No token found"); a request with a malformed header or
/// a bad/expired token gets 403 + "Invalid Token".
pub async fn token_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(auth_header) = headers.get("authorization") else {
        return Err(ApiError::MissingToken);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::InvalidToken)?;

    let claims = auth::verify_token(token).map_err(|e| {
        tracing::warn!("Token verification error: {}", e);
        ApiError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
