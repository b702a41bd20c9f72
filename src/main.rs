use gifthaven_api::config;
use gifthaven_api::database::Store;
use gifthaven_api::routes;
use gifthaven_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, ACCESS_KEY_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Gift Haven API in {:?} mode", config.environment);

    // A store that is unreachable at startup only logs; requests report their
    // own failures until the database comes back.
    let store = Store::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("invalid MongoDB configuration: {}", e));

    let app = routes::app(AppState::new(store));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Gift Haven server running on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
