pub mod carts;
pub mod products;
pub mod tokens;
pub mod users;
