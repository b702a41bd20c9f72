use axum::routing::{delete, get, patch, post, put};
use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::{token_auth_middleware, verify_seller_middleware};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(root))
        .merge(user_routes())
        .merge(product_read_routes())
        .merge(product_write_routes(state.clone()))
        .merge(cart_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

fn user_routes() -> Router<AppState> {
    use public::{tokens, users};

    Router::new()
        .route("/users", post(users::create_user))
        .route("/user", get(users::get_user).patch(users::manage_user))
        .route("/all-users", get(users::all_users))
        .route("/authentication", post(tokens::issue_token))
}

fn product_read_routes() -> Router<AppState> {
    use public::products;

    Router::new()
        .route("/my-products", get(products::my_products))
        .route("/single-product", get(products::single_product))
        .route("/all-products", get(products::all_products))
        .route("/product-categories", get(products::product_categories))
}

/// Product writes sit behind two layers run in order: token verification,
/// then the seller policy gate.
fn product_write_routes(state: AppState) -> Router<AppState> {
    use protected::products;

    Router::new()
        .route("/add-products", post(products::add_product))
        .route("/update-product", patch(products::update_product))
        .route("/product", delete(products::delete_product))
        .route_layer(middleware::from_fn_with_state(
            state,
            verify_seller_middleware,
        ))
        .route_layer(middleware::from_fn(token_auth_middleware))
}

fn cart_routes() -> Router<AppState> {
    use public::carts;

    Router::new()
        .route("/manage-cart", put(carts::manage_cart))
        .route("/manage-wishlist", put(carts::manage_wishlist))
        .route("/cart-list", get(carts::cart_list))
        .route("/wishlist-list", get(carts::wishlist_list))
}

async fn root() -> &'static str {
    "Gift Haven server is running"
}
