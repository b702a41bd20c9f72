use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use mongodb::bson::{doc, Document};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Outcome of the seller authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerGate {
    Allow,
    Forbidden,
    Pending,
}

/// Decide whether the stored user record may write product data.
///
/// No record, or any role other than "seller", is forbidden outright. A
/// seller whose status is still "pending" is held until an administrator
/// approves the account; any other status value counts as approved.
pub fn evaluate_seller(user: Option<&Document>) -> SellerGate {
    let Some(user) = user else {
        return SellerGate::Forbidden;
    };

    if user.get_str("role").map_or(true, |role| role != "seller") {
        return SellerGate::Forbidden;
    }

    if user.get_str("status").is_ok_and(|status| status == "pending") {
        return SellerGate::Pending;
    }

    SellerGate::Allow
}

/// Middleware gating the product-write endpoints on the seller policy.
///
/// Looks the verified identity up in the users collection and halts the
/// request unless the record passes [`evaluate_seller`]. Both rejections are
/// soft (200 + message), matching what the storefront client expects.
pub async fn verify_seller_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("seller check reached without token verification");
            ApiError::MissingToken
        })?;

    let email = auth_user.email.unwrap_or_default();
    let user = state.store.users.find_one(doc! { "email": &email }).await?;

    match evaluate_seller(user.as_ref()) {
        SellerGate::Allow => Ok(next.run(request).await),
        SellerGate::Forbidden => {
            tracing::warn!("seller check failed: '{}' is not a seller", email);
            Err(ApiError::Forbidden)
        }
        SellerGate::Pending => {
            tracing::debug!("seller check held: '{}' is pending approval", email);
            Err(ApiError::AccountPending)
        }
    }
}
