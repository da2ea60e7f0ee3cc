#![allow(dead_code)]

use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use matchodds_backend::run;
use matchodds_backend::config::settings::{get_config, DatabaseSettings};
use matchodds_backend::db::{InMemoryMatchStore, MatchStore, PgMatchStore};
use matchodds_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryMatchStore>,
    pub client: Client,
}

pub struct PgTestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: Client,
}

fn launch(store: Arc<dyn MatchStore>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let server = run(listener, store, vec!["http://localhost:3000".to_string()])
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

/// Start the server on a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let store = Arc::new(InMemoryMatchStore::new());
    let address = launch(store.clone());
    TestApp {
        address,
        store,
        client: Client::new(),
    }
}

/// Start the server on a throw-away Postgres database.
pub async fn spawn_app_with_postgres() -> PgTestApp {
    Lazy::force(&TRACING);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;
    let address = launch(Arc::new(PgMatchStore::new(connection_pool.clone())));
    PgTestApp {
        address,
        db_pool: connection_pool,
        client: Client::new(),
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    PgMatchStore::new(connection_pool.clone())
        .migrate()
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

pub fn osfp_pao_payload() -> Value {
    json!({
        "teamA": "OSFP",
        "teamB": "PAO",
        "sport": "BASKETBALL",
        "date": "21/02/2025",
        "time": "21:30",
        "odds": [
            { "specifier": "ONE", "odd": 1.4 },
            { "specifier": "TWO", "odd": 1.3 }
        ]
    })
}

pub fn paok_pao_payload() -> Value {
    json!({
        "teamA": "PAOK",
        "teamB": "PAO",
        "sport": "FOOTBALL",
        "date": "15/04/2025",
        "time": "17:30"
    })
}

/// POST a match and return its id from the response body.
pub async fn create_match(client: &Client, address: &str, payload: &Value) -> i64 {
    let response = client
        .post(&format!("{}/api/v1/matches", address))
        .json(payload)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 201, "Match creation should succeed");
    let body: Value = response.json().await.expect("Failed to parse match body");
    body["id"].as_i64().expect("No id in created match")
}
