// User registration and administrative user management.
use axum::extract::{Query, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{parse_object_id, require, EmailQuery, UserActionQuery};
use crate::state::AppState;

/// POST /users - create the user unless the email is already registered.
///
/// Uniqueness is an existence check, not a store constraint; two identical
/// concurrent registrations can still both insert. Accepted trade-off.
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let email = user
        .get_str("email")
        .map_err(|_| ApiError::bad_request("email is required"))?;

    let existing = state.store.users.find_one(doc! { "email": email }).await?;
    if existing.is_some() {
        return Ok(Json(json!({ "message": "User already exists" })));
    }

    let result = state.store.users.insert_one(&user).await?;
    Ok(Json(json!({
        "acknowledged": true,
        "insertedId": result.inserted_id,
    })))
}

/// GET /user - fetch one user by email, null when absent.
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Option<Document>>, ApiError> {
    let email = require(query.email.as_deref(), "email")?;
    let user = state.store.users.find_one(doc! { "email": email }).await?;
    Ok(Json(user))
}

/// GET /all-users - list every user record.
pub async fn all_users(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let users = state
        .store
        .users
        .find(doc! {})
        .await?
        .try_collect()
        .await?;
    Ok(Json(users))
}

/// PATCH /user?userId=&action= - administrative status change or removal.
///
/// `action=remove` deletes the account; any other action value is written to
/// the user's `status` field, which is how a pending seller gets approved.
pub async fn manage_user(
    State(state): State<AppState>,
    Query(query): Query<UserActionQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = require(query.user_id.as_deref(), "userId")?;
    let action = require(query.action.as_deref(), "action")?;
    let user_oid = parse_object_id(user_id, "userId")?;

    if action == "remove" {
        let result = state.store.users.delete_one(doc! { "_id": user_oid }).await?;
        return Ok(Json(json!({
            "acknowledged": true,
            "deletedCount": result.deleted_count,
        })));
    }

    let result = state
        .store
        .users
        .update_one(doc! { "_id": user_oid }, doc! { "$set": { "status": action } })
        .await?;
    Ok(Json(json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id,
    })))
}
