// Public product catalog reads: per-seller listing, single fetch, filtered
// search and the distinct category list.
use axum::extract::{Query, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};

use crate::error::ApiError;
use crate::models::{parse_object_id, require, EmailQuery, IdQuery, ProductQuery};
use crate::state::AppState;

/// GET /my-products - products published by one seller.
pub async fn my_products(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let email = require(query.email.as_deref(), "email")?;
    let products = state
        .store
        .products
        .find(doc! { "sellerEmail": email })
        .await?
        .try_collect()
        .await?;
    Ok(Json(products))
}

/// GET /single-product - fetch one product by id, null when absent.
pub async fn single_product(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Option<Document>>, ApiError> {
    let id = require(query.id.as_deref(), "id")?;
    let oid = parse_object_id(id, "id")?;
    let product = state.store.products.find_one(doc! { "_id": oid }).await?;
    Ok(Json(product))
}

/// GET /all-products - filtered, price-sorted catalog listing.
///
/// `name` and `category` are case-insensitive substring matches, `brand` is
/// exact. `sort=asc` sorts by ascending price; anything else descends.
pub async fn all_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter = product_filter(&query);
    let direction = price_sort_direction(query.sort.as_deref());

    let products = state
        .store
        .products
        .find(filter)
        .sort(doc! { "price": direction })
        .await?
        .try_collect()
        .await?;
    Ok(Json(products))
}

/// GET /product-categories - distinct category values across the catalog.
pub async fn product_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Bson>>, ApiError> {
    let categories = state
        .store
        .products
        .distinct("category", doc! {})
        .await?;
    Ok(Json(categories))
}

fn product_filter(query: &ProductQuery) -> Document {
    let mut filter = Document::new();

    if let Some(name) = non_empty(query.name.as_deref()) {
        filter.insert("name", doc! { "$regex": name, "$options": "i" });
    }
    if let Some(category) = non_empty(query.category.as_deref()) {
        filter.insert("category", doc! { "$regex": category, "$options": "i" });
    }
    if let Some(brand) = non_empty(query.brand.as_deref()) {
        filter.insert("brand", brand);
    }

    filter
}

fn price_sort_direction(sort: Option<&str>) -> i32 {
    if sort == Some("asc") {
        1
    } else {
        -1
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
