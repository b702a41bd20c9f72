// Request shapes shared by the route handlers.
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Query for the administrative PATCH /user endpoint. `action` is open-world
/// on purpose: `remove` deletes the user and any other value becomes the new
/// seller status (that is how accounts get approved).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActionQuery {
    pub user_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageListRequest {
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdListQuery {
    pub product_ids: Option<String>,
}

/// The only cart/wishlist mutations there are. Anything else posted as an
/// `action` is rejected at the boundary instead of silently doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Add,
    Remove,
}

impl ListAction {
    pub fn parse(action: Option<&str>) -> Result<Self, ApiError> {
        match action {
            Some("add") => Ok(ListAction::Add),
            Some("remove") => Ok(ListAction::Remove),
            Some(other) => Err(ApiError::bad_request(format!(
                "unsupported action '{}', expected 'add' or 'remove'",
                other
            ))),
            None => Err(ApiError::bad_request("action is required")),
        }
    }
}

/// Parse a store identifier supplied by the client, answering 400 instead of
/// letting a malformed id fail deep inside a store call.
pub fn parse_object_id(id: &str, field: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id)
        .map_err(|_| ApiError::bad_request(format!("invalid {}: '{}'", field, id)))
}

/// Presence check for required query/body fields.
pub fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("{} is required", field))),
    }
}
