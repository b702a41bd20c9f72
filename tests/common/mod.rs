#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use axum::Router;
use gifthaven_api::database::Store;
use gifthaven_api::routes;
use gifthaven_api::state::AppState;
use mongodb::Client;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Make the token secret available before the config singleton initializes.
pub fn init_test_env() {
    std::env::set_var("ACCESS_KEY_TOKEN", TEST_SECRET);
}

/// Build the router over a store that is never contacted, for driving
/// request paths that resolve before any database round trip.
pub async fn offline_app() -> Result<Router> {
    init_test_env();

    let client = Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .context("client options")?;
    let store = Store::new(&client.database("gifthaven_offline_tests"));
    Ok(routes::app(AppState::new(store)))
}

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn(mongodb_uri: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Fresh database name per run so assertions see only this run's data
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let db_name = format!("gifthaven_test_{}", nanos);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gifthaven-api"));
        cmd.env("PORT", port.to_string())
            .env("MONGODB_URI", mongodb_uri)
            .env("DB_NAME", db_name)
            .env("ACCESS_KEY_TOKEN", TEST_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Spawn the real server against the MongoDB deployment named by
/// MONGODB_URI. Returns None (test should skip) when the variable is unset.
pub async fn live_server() -> Result<Option<&'static TestServer>> {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        return Ok(None);
    };

    let server =
        SERVER.get_or_init(|| TestServer::spawn(&uri).expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}
