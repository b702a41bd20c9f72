// Cart and wishlist operations. Both lists live on the user document as
// arrays of product ids maintained with set semantics: $addToSet keeps
// repeated adds idempotent and $pull of an absent id is a no-op.
use axum::extract::{Query, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{parse_object_id, require, IdListQuery, ListAction, ManageListRequest};
use crate::state::AppState;

/// PUT /manage-cart - add or remove a product id on the user's cart.
pub async fn manage_cart(
    State(state): State<AppState>,
    Json(request): Json<ManageListRequest>,
) -> Result<Json<Value>, ApiError> {
    update_list(&state, "cart", request).await
}

/// PUT /manage-wishlist - add or remove a product id on the user's wishlist.
pub async fn manage_wishlist(
    State(state): State<AppState>,
    Json(request): Json<ManageListRequest>,
) -> Result<Json<Value>, ApiError> {
    update_list(&state, "wishlist", request).await
}

/// GET /cart-list - resolve the cart's id list to product documents.
pub async fn cart_list(
    State(state): State<AppState>,
    Query(query): Query<IdListQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    resolve_id_list(&state, query).await
}

/// GET /wishlist-list - resolve the wishlist's id list to product documents.
pub async fn wishlist_list(
    State(state): State<AppState>,
    Query(query): Query<IdListQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    resolve_id_list(&state, query).await
}

async fn update_list(
    state: &AppState,
    list: &str,
    request: ManageListRequest,
) -> Result<Json<Value>, ApiError> {
    let user_id = parse_object_id(require(request.user_id.as_deref(), "userId")?, "userId")?;
    let product_id =
        parse_object_id(require(request.product_id.as_deref(), "productId")?, "productId")?;

    let update = match ListAction::parse(request.action.as_deref())? {
        ListAction::Add => doc! { "$addToSet": { list: product_id } },
        ListAction::Remove => doc! { "$pull": { list: product_id } },
    };

    let result = state
        .store
        .users
        .update_one(doc! { "_id": user_id }, update)
        .await?;
    Ok(Json(json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id,
    })))
}

async fn resolve_id_list(
    state: &AppState,
    query: IdListQuery,
) -> Result<Json<Vec<Document>>, ApiError> {
    let raw = require(query.product_ids.as_deref(), "productIds")?;
    let ids = parse_id_list(raw)?;

    let products = state
        .store
        .products
        .find(doc! { "_id": { "$in": ids } })
        .await?
        .try_collect()
        .await?;
    Ok(Json(products))
}

/// The client sends the id list as a JSON-encoded array in the query string.
fn parse_id_list(raw: &str) -> Result<Vec<ObjectId>, ApiError> {
    let ids: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| ApiError::bad_request("productIds must be a JSON array of ids"))?;

    ids.iter()
        .map(|id| parse_object_id(id, "productIds"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_parses_a_json_array_of_hex_ids() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let raw = format!(r#"["{}","{}"]"#, a.to_hex(), b.to_hex());

        assert_eq!(parse_id_list(&raw).unwrap(), vec![a, b]);
        assert_eq!(parse_id_list("[]").unwrap(), Vec::<ObjectId>::new());
    }

    #[test]
    fn id_list_rejects_non_array_and_malformed_ids() {
        assert!(parse_id_list("not json").is_err());
        assert!(parse_id_list(r#""just-a-string""#).is_err());
        assert!(parse_id_list(r#"["nope"]"#).is_err());
    }
}
