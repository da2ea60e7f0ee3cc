//! End-to-end checks against a real PostgreSQL instance.
//!
//! Each test creates its own database named after a random uuid, using the
//! connection details from `configuration/` (or `POSTGRES__*` overrides).
//! Run with `cargo test -- --ignored` once Postgres is up.

use serde_json::{json, Value};

mod common;
use common::utils::{create_match, osfp_pao_payload, paok_pao_payload, spawn_app_with_postgres, PgTestApp};

async fn counts(app: &PgTestApp) -> (i64, i64) {
    let matches: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM matches")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count matches");
    let odds: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM match_odds")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count odds");
    (matches.0, odds.0)
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn match_lifecycle_against_postgres() {
    let app = spawn_app_with_postgres().await;

    let id = create_match(&app.client, &app.address, &osfp_pao_payload()).await;
    assert_eq!(counts(&app).await, (1, 2));

    let response = app.client
        .post(&format!("{}/api/v1/matches", app.address))
        .json(&json!({
            "teamA": "OSFP",
            "teamB": "PAO",
            "sport": "BASKETBALL",
            "date": "21/02/2025",
            "time": "15:30"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(counts(&app).await, (1, 2));

    create_match(&app.client, &app.address, &paok_pao_payload()).await;
    assert_eq!(counts(&app).await, (2, 2));

    let response = app.client
        .patch(&format!("{}/api/v1/matches/{}", app.address, id))
        .json(&json!({ "time": "19:00", "description": "New Description" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let stored: (String, chrono::NaiveTime) =
        sqlx::query_as("SELECT description, match_time FROM matches WHERE id = $1")
            .bind(id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(stored.0, "New Description");
    assert_eq!(stored.1, chrono::NaiveTime::from_hms_opt(19, 0, 0).unwrap());

    let response = app.client
        .delete(&format!("{}/api/v1/matches/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
    assert_eq!(counts(&app).await, (1, 0));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn odds_lifecycle_against_postgres() {
    let app = spawn_app_with_postgres().await;
    let id = create_match(&app.client, &app.address, &osfp_pao_payload()).await;

    let response = app.client
        .post(&format!("{}/api/v1/matches/{}/odds", app.address, id))
        .json(&json!({ "specifier": "X", "odd": 3.44 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(counts(&app).await, (1, 3));

    let response = app.client
        .post(&format!("{}/api/v1/matches/{}/odds", app.address, id))
        .json(&json!({ "specifier": "X", "odd": 2.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(counts(&app).await, (1, 3));

    let odd_id = created["id"].as_i64().unwrap();
    let response = app.client
        .patch(&format!("{}/api/v1/matches/{}/odds/{}", app.address, id, odd_id))
        .json(&json!({ "odd": 3.1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let page: Value = app.client
        .get(&format!("{}/api/v1/matches", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["odds"][2]["odd"], json!(3.1));

    let response = app.client
        .delete(&format!("{}/api/v1/matches/{}/odds/{}", app.address, id, odd_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
    assert_eq!(counts(&app).await, (1, 2));
}
