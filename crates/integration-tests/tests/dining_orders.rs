//! Menu and dining order tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and seed data
//!   loaded (cargo run -p fairway-cli -- seed)
//! - The server running (cargo run -p fairway-server)
//!
//! Run with: cargo test -p fairway-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use fairway_integration_tests::{base_url, client, register_member};

/// First available menu item, from the seeded menu.
async fn first_menu_item(client: &reqwest::Client) -> Value {
    let resp = client
        .get(format!("{}/api/menu", base_url()))
        .send()
        .await
        .expect("Failed to fetch menu");
    assert_eq!(resp.status(), StatusCode::OK);

    let menu: Value = resp.json().await.expect("Failed to parse menu");
    let items = menu.as_array().expect("menu array");
    assert!(!items.is_empty(), "menu should be seeded before these tests");
    items[0].clone()
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_menu_filters_by_category() {
    let client = client();
    register_member(&client).await;

    let resp = client
        .get(format!("{}/api/menu?category=mains", base_url()))
        .send()
        .await
        .expect("Failed to fetch menu");
    assert_eq!(resp.status(), StatusCode::OK);

    let menu: Value = resp.json().await.expect("Failed to parse menu");
    for item in menu.as_array().expect("menu array") {
        assert_eq!(item["category"], "mains");
    }
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_menu_writes_require_admin() {
    let client = client();
    register_member(&client).await;

    let resp = client
        .post(format!("{}/api/menu", base_url()))
        .json(&json!({
            "name": "Contraband Special",
            "category": "mains",
            "price": "9.99",
        }))
        .send()
        .await
        .expect("Failed to attempt menu write");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_order_totals_are_server_priced() {
    let client = client();
    register_member(&client).await;
    let item = first_menu_item(&client).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({
            "location": "Terrace table 4",
            "items": [{"menuItemId": item["id"], "quantity": 2}],
        }))
        .send()
        .await
        .expect("Failed to place order");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");

    assert_eq!(order["status"], "placed");
    let lines = order["items"].as_array().expect("order items");
    assert_eq!(lines.len(), 1);
    // Unit price comes from the menu, not the request
    assert_eq!(lines[0]["unitPrice"], item["price"]);
    assert_eq!(lines[0]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_empty_order_rejected() {
    let client = client();
    register_member(&client).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({"location": "Bar", "items": []}))
        .send()
        .await
        .expect("Failed to place order");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_order_accrues_loyalty_and_shows_in_history() {
    let client = client();
    register_member(&client).await;
    let item = first_menu_item(&client).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({
            "location": "Clubhouse",
            "items": [{"menuItemId": item["id"], "quantity": 1}],
        }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");

    // One point per whole currency unit of the total
    let total: f64 = order["total"]
        .as_str()
        .expect("total string")
        .parse()
        .expect("total parses");
    let expected_points = total.trunc() as i64;

    let resp = client
        .get(format!("{}/api/loyalty", base_url()))
        .send()
        .await
        .expect("Failed to fetch loyalty balance");
    let balance: Value = resp.json().await.expect("Failed to parse balance");
    assert_eq!(balance["loyaltyPoints"], expected_points);

    // The order shows in the member's history
    let resp = client
        .get(format!("{}/api/orders", base_url()))
        .send()
        .await
        .expect("Failed to list orders");
    let orders: Value = resp.json().await.expect("Failed to parse orders");
    assert!(
        orders
            .as_array()
            .expect("orders array")
            .iter()
            .any(|o| o["id"] == order["id"]),
        "placed order should appear in the member's history"
    );
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_members_cannot_change_order_status() {
    let client = client();
    register_member(&client).await;
    let item = first_menu_item(&client).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({
            "location": "Bar",
            "items": [{"menuItemId": item["id"], "quantity": 1}],
        }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse order");
    let id = order["id"].as_str().expect("order id").to_owned();

    let resp = client
        .patch(format!("{}/api/orders/{id}/status", base_url()))
        .json(&json!({"status": "delivered"}))
        .send()
        .await
        .expect("Failed to attempt status change");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
