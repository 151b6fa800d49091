//! Invoices dashboard server
//!
//! Usage: `invoice-dashboard [config.yaml]`. Without an argument the path is
//! read from `INVOICES_CONFIG`; without either, defaults apply.

use invoices::prelude::*;
use tracing_subscriber::EnvFilter;

const ENV_CONFIG_PATH: &str = "INVOICES_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_CONFIG_PATH).ok());
    let config = AppConfig::load(path.as_deref())?;
    tracing::info!(
        config = path.as_deref().unwrap_or("<defaults>"),
        delete_enabled = config.actions.delete_enabled,
        "configuration loaded"
    );

    let bind = config.server.bind.clone();
    let builder = with_store(ServerBuilder::new(), &config).await?;
    builder.with_config(config).serve(&bind).await
}

#[cfg(feature = "postgres")]
async fn with_store(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    use invoices::storage::postgres::{connect, ensure_schema};

    match &config.database.url {
        Some(url) => {
            let pool = connect(url, config.database.max_connections).await?;
            ensure_schema(&pool).await?;
            tracing::info!("using PostgreSQL store");
            Ok(builder.with_store(PostgresInvoiceStore::new(pool)))
        }
        None => Ok(in_memory(builder)),
    }
}

#[cfg(not(feature = "postgres"))]
async fn with_store(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    if config.database.url.is_some() {
        tracing::warn!("database URL ignored: built without the `postgres` feature");
    }
    Ok(in_memory(builder))
}

fn in_memory(builder: ServerBuilder) -> ServerBuilder {
    tracing::info!("using seeded in-memory store");
    builder.with_store(InMemoryInvoiceStore::seeded())
}
