// Product writes. Every route here sits behind the token middleware and the
// seller policy gate; the gate checks role and status only, so any approved
// seller may update or delete any product (shared-catalog policy, see
// DESIGN.md before tightening).
use axum::extract::{Query, State};
use axum::Json;
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{parse_object_id, require, IdQuery};
use crate::state::AppState;

/// POST /add-products - insert the posted product document as-is.
pub async fn add_product(
    State(state): State<AppState>,
    Json(product): Json<Document>,
) -> Result<Json<Value>, ApiError> {
    let result = state.store.products.insert_one(&product).await?;
    Ok(Json(json!({
        "acknowledged": true,
        "insertedId": result.inserted_id,
    })))
}

/// PATCH /update-product?id= - $set the posted fields, answer with the
/// pre-update document (null when the id matched nothing).
pub async fn update_product(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(update): Json<Document>,
) -> Result<Json<Option<Document>>, ApiError> {
    let id = require(query.id.as_deref(), "id")?;
    let oid = parse_object_id(id, "id")?;

    if update.is_empty() {
        return Err(ApiError::bad_request("no fields to update"));
    }

    let previous = state
        .store
        .products
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": update })
        .await?;
    Ok(Json(previous))
}

/// DELETE /product?id= - delete one product by id.
pub async fn delete_product(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = require(query.id.as_deref(), "id")?;
    let oid = parse_object_id(id, "id")?;

    let result = state.store.products.delete_one(doc! { "_id": oid }).await?;
    Ok(Json(json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })))
}
