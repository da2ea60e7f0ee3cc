use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use matchodds_backend::run;
use matchodds_backend::config::settings::{get_config, StorageBackend};
use matchodds_backend::db::{InMemoryMatchStore, MatchStore, PgMatchStore};
use matchodds_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "matchodds-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let store: Arc<dyn MatchStore> = match config.application.storage {
        StorageBackend::Postgres => {
            // Only try to establish connection when actually used
            let connection_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_lazy(
                    config.database.connection_string().expose_secret()
                )
                .expect("Failed to create Postgres connection pool");
            let store = PgMatchStore::new(connection_pool);
            if let Err(e) = store.migrate().await {
                tracing::error!("❌ Failed to run database migrations: {}", e);
                std::process::exit(1);
            }
            tracing::info!("✅ Using Postgres match store");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory match store, data is lost on restart");
            Arc::new(InMemoryMatchStore::new())
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        store,
        config.application.allowed_origins.clone(),
    )?.await
}
