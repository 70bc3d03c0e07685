//! Tee sheet and booking tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p fairway-server)
//!
//! Run with: cargo test -p fairway-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use fairway_integration_tests::{base_url, client, register_member};

/// A random far-future date, so re-runs never collide with earlier bookings.
fn random_date() -> String {
    let bytes = uuid::Uuid::new_v4().into_bytes();
    format!("2031-{:02}-{:02}", (bytes[0] % 12) + 1, (bytes[1] % 28) + 1)
}

async fn book(client: &reqwest::Client, date: &str, time_slot: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/bookings", base_url()))
        .json(&json!({
            "bookingDate": date,
            "timeSlot": time_slot,
            "players": 2,
            "holes": 18,
        }))
        .send()
        .await
        .expect("Failed to create booking")
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_tee_sheet_has_full_grid() {
    let client = client();
    register_member(&client).await;

    let date = random_date();
    let resp = client
        .get(format!("{}/api/bookings/slots?date={date}", base_url()))
        .send()
        .await
        .expect("Failed to fetch tee sheet");

    assert_eq!(resp.status(), StatusCode::OK);
    let sheet: Value = resp.json().await.expect("Failed to parse tee sheet");

    let slots = sheet["slots"].as_array().expect("slots array");
    assert_eq!(slots.len(), 72);
    assert_eq!(slots[0]["time"], "06:00");
    assert_eq!(slots[71]["time"], "17:50");
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_double_booking_conflicts() {
    // Two different members race for the same slot; the second gets 409
    let first = client();
    register_member(&first).await;
    let second = client();
    register_member(&second).await;
    let date = random_date();

    let resp = book(&first, &date, "14:40").await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let booking: Value = resp.json().await.expect("Failed to parse booking");
    assert_eq!(booking["status"], "confirmed");

    let resp = book(&second, &date, "14:40").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Cancelling frees the slot again
    let id = booking["id"].as_str().expect("booking id").to_owned();
    let resp = first
        .delete(format!("{}/api/bookings/{id}", base_url()))
        .send()
        .await
        .expect("Failed to cancel booking");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = book(&second, &date, "14:40").await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_off_grid_slot_rejected() {
    let client = client();
    register_member(&client).await;
    let date = random_date();

    let resp = book(&client, &date, "14:45").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = book(&client, &date, "05:00").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_booking_earns_loyalty_points() {
    let client = client();
    register_member(&client).await;

    let resp = book(&client, &random_date(), "07:20").await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/api/loyalty", base_url()))
        .send()
        .await
        .expect("Failed to fetch loyalty balance");
    assert_eq!(resp.status(), StatusCode::OK);

    let balance: Value = resp.json().await.expect("Failed to parse balance");
    assert_eq!(balance["loyaltyPoints"], 25);

    // And the booking confirmation shows up as an unread notification
    let resp = client
        .get(format!("{}/api/notifications?unread=true", base_url()))
        .send()
        .await
        .expect("Failed to fetch notifications");
    assert_eq!(resp.status(), StatusCode::OK);

    let notifications: Value = resp.json().await.expect("Failed to parse notifications");
    assert!(
        !notifications.as_array().expect("array").is_empty(),
        "booking should produce a notification"
    );
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_members_cannot_see_others_bookings() {
    let owner = client();
    register_member(&owner).await;

    let resp = book(&owner, &random_date(), "11:30").await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let booking: Value = resp.json().await.expect("Failed to parse booking");
    let id = booking["id"].as_str().expect("booking id").to_owned();

    let other = client();
    register_member(&other).await;

    let resp = other
        .get(format!("{}/api/bookings/{id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch booking");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
