//! BizTime server binary
//!
//! Usage: `biztime [CONFIG]`; the config path may also come from `BIZTIME_CONFIG`.

use anyhow::{Context, Result};
use biztime::config::{AppConfig, CONFIG_PATH_ENV};
use biztime::server::ServerBuilder;
use biztime::storage;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .or_else(|| std::env::args().nth(1));
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    config.logging.init()?;
    tracing::info!(
        config = config_path.as_deref().unwrap_or("<defaults>"),
        backend = ?config.storage.backend,
        "Starting BizTime"
    );

    let store = storage::connect(&config.storage).await?;
    if config.storage.seed {
        storage::seed_sample_data(store.as_ref())
            .await
            .context("Failed to seed sample data")?;
    }

    ServerBuilder::new()
        .with_shared_store(store)
        .with_cors(config.server.cors)
        .serve(&config.server.address())
        .await
}
