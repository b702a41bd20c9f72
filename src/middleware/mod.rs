pub mod auth;
pub mod verify_seller;

pub use auth::{token_auth_middleware, AuthUser};
pub use verify_seller::{evaluate_seller, verify_seller_middleware, SellerGate};
