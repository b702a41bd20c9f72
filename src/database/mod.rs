use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::config::DatabaseConfig;

/// Handles to the two collections the service works against.
///
/// Constructed once at startup and handed to handlers through axum state;
/// `Collection` is a cheap clone over the shared client, so this is the whole
/// per-request store context.
#[derive(Clone)]
pub struct Store {
    pub users: Collection<Document>,
    pub products: Collection<Document>,
}

impl Store {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
            products: db.collection("products"),
        }
    }

    /// Build the store from configuration and ping the deployment once.
    ///
    /// A failed ping is logged but not fatal: the server still comes up and
    /// each store-backed request answers with its own error until the
    /// database is reachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let options = ClientOptions::parse(&config.uri).await?;
        let client = Client::with_options(options)?;
        let db = client.database(&config.database);

        match db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => tracing::info!("MongoDB connected successfully"),
            Err(e) => tracing::warn!("MongoDB not reachable at startup: {}", e),
        }

        Ok(Self::new(&db))
    }
}
