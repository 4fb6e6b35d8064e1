//! API integration tests
//!
//! These run against a live server with a scratch database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a chamber asset and return its ID
async fn create_chamber(client: &Client, name: &str) -> String {
    let response = client
        .post(format!("{}/assets", BASE_URL))
        .json(&json!({
            "asset_type": "chamber",
            "name": name,
            "manufacturer": "Espec",
            "model": "PL-3J"
        }))
        .send()
        .await
        .expect("Failed to create asset");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse asset");
    body["id"].as_str().expect("No asset id").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_asset_crud() {
    let client = Client::new();
    let id = create_chamber(&client, "TH-Chamber-IT-1").await;

    let response = client
        .get(format!("{}/assets/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to fetch asset");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "available");

    let response = client
        .put(format!("{}/assets/{}", BASE_URL, id))
        .json(&json!({"location": "Lab 2"}))
        .send()
        .await
        .expect("Failed to update asset");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/assets/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to delete asset");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_usage_log_marks_asset_in_use() {
    let client = Client::new();
    let asset_id = create_chamber(&client, "TH-Chamber-IT-2").await;

    // A running log flips the chamber to in-use in the same commit
    let response = client
        .post(format!("{}/usage-logs", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "operator": "integration",
            "start_time": "2025-01-01T08:00:00Z",
            "status": "in-progress"
        }))
        .send()
        .await
        .expect("Failed to create usage log");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let log_id = body["log"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["asset_status_writes"][0]["new_status"], "in-use");

    // Completing the only log frees the chamber
    let response = client
        .put(format!("{}/usage-logs/{}", BASE_URL, log_id))
        .json(&json!({"status": "completed"}))
        .send()
        .await
        .expect("Failed to update usage log");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["asset_status_writes"][0]["new_status"], "available");

    client
        .delete(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore]
async fn test_repair_ticket_lifecycle() {
    let client = Client::new();
    let asset_id = create_chamber(&client, "TH-Chamber-IT-3").await;

    let response = client
        .post(format!("{}/repair-tickets", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "problem_desc": "compressor noise"
        }))
        .send()
        .await
        .expect("Failed to create ticket");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let ticket_id = body["ticket"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["ticket"]["status"], "quote-pending");
    assert_eq!(body["asset_status_write"]["new_status"], "maintenance");

    // A second open ticket on the same asset is rejected
    let response = client
        .post(format!("{}/repair-tickets", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "problem_desc": "door seal"
        }))
        .send()
        .await
        .expect("Failed to send duplicate ticket");
    assert_eq!(response.status(), 422);

    // repair-pending without a quote is rejected
    let response = client
        .post(format!("{}/repair-tickets/{}/transition", BASE_URL, ticket_id))
        .json(&json!({"to": "repair-pending"}))
        .send()
        .await
        .expect("Failed to send transition");
    assert_eq!(response.status(), 422);

    // with vendor and quote it succeeds
    let response = client
        .post(format!("{}/repair-tickets/{}/transition", BASE_URL, ticket_id))
        .json(&json!({
            "to": "repair-pending",
            "vendor_name": "Acme",
            "quote_amount": 500
        }))
        .send()
        .await
        .expect("Failed to send transition");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert!(body["ticket"]["quote_at"].is_string());
    assert_eq!(body["asset_status_write"]["new_status"], "maintenance");

    // completing the only ticket frees the asset
    let response = client
        .post(format!("{}/repair-tickets/{}/transition", BASE_URL, ticket_id))
        .json(&json!({"to": "completed"}))
        .send()
        .await
        .expect("Failed to send transition");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["asset_status_write"]["new_status"], "available");
    assert_eq!(body["ticket"]["timeline"].as_array().unwrap().len(), 3);

    // completed tickets can no longer change state
    let response = client
        .post(format!("{}/repair-tickets/{}/transition", BASE_URL, ticket_id))
        .json(&json!({"to": "repair-pending", "vendor_name": "Acme", "quote_amount": 1}))
        .send()
        .await
        .expect("Failed to send transition");
    assert_eq!(response.status(), 422);

    client
        .delete(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore]
async fn test_timeline_renders() {
    let client = Client::new();

    let response = client
        .get(format!("{}/timeline?days_before=3&days_after=5", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch timeline");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["days"].as_array().unwrap().len(), 9);
    assert!(body["lanes"].is_array());
    assert!(body["day_start_hour"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_reconcile_sweep_is_idempotent() {
    let client = Client::new();

    // Second run right after the first must be a no-op
    let first = client
        .post(format!("{}/assets/reconcile", BASE_URL))
        .send()
        .await
        .expect("Failed to run sweep");
    assert!(first.status().is_success());

    let second = client
        .post(format!("{}/assets/reconcile", BASE_URL))
        .send()
        .await
        .expect("Failed to run sweep");
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["writes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_stats_overview() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch stats");
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert!(body["assets_total"].is_number());
    assert!(body["open_tickets"].is_number());
    assert!(body["calibration_due"].is_array());
}
