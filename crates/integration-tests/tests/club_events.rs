//! Club event registration tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and seed data
//!   loaded (cargo run -p fairway-cli -- seed)
//! - The server running (cargo run -p fairway-server)
//!
//! Run with: cargo test -p fairway-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use fairway_integration_tests::{base_url, client, register_member};

/// First upcoming event, from the seeded calendar.
async fn first_event(client: &reqwest::Client) -> Value {
    let resp = client
        .get(format!("{}/api/events", base_url()))
        .send()
        .await
        .expect("Failed to fetch events");
    assert_eq!(resp.status(), StatusCode::OK);

    let events: Value = resp.json().await.expect("Failed to parse events");
    let events = events.as_array().expect("events array");
    assert!(
        !events.is_empty(),
        "events should be seeded before these tests"
    );
    events[0].clone()
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_upcoming_events_are_scheduled() {
    let client = client();
    register_member(&client).await;

    let event = first_event(&client).await;
    assert_eq!(event["status"], "scheduled");
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_event_registration_is_idempotent_guarded() {
    let client = client();
    register_member(&client).await;
    let event = first_event(&client).await;
    let id = event["id"].as_str().expect("event id").to_owned();

    let register_url = format!("{}/api/events/{id}/register", base_url());

    let resp = client
        .post(&register_url)
        .send()
        .await
        .expect("Failed to register for event");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Registering again conflicts
    let resp = client
        .post(&register_url)
        .send()
        .await
        .expect("Failed to re-register for event");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Withdrawing frees the place, and a second withdrawal is a 404
    let resp = client
        .delete(&register_url)
        .send()
        .await
        .expect("Failed to withdraw registration");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .delete(&register_url)
        .send()
        .await
        .expect("Failed to re-withdraw registration");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_event_registration_notifies_member() {
    let client = client();
    register_member(&client).await;
    let event = first_event(&client).await;
    let id = event["id"].as_str().expect("event id").to_owned();

    let resp = client
        .post(format!("{}/api/events/{id}/register", base_url()))
        .send()
        .await
        .expect("Failed to register for event");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/api/notifications?unread=true", base_url()))
        .send()
        .await
        .expect("Failed to fetch notifications");
    let notifications: Value = resp.json().await.expect("Failed to parse notifications");
    let notifications = notifications.as_array().expect("array");
    assert!(
        notifications.iter().any(|n| n["kind"] == "event"),
        "registration should produce an event notification"
    );

    // Mark-all clears the unread filter
    let resp = client
        .post(format!("{}/api/notifications/read-all", base_url()))
        .send()
        .await
        .expect("Failed to mark notifications read");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/api/notifications?unread=true", base_url()))
        .send()
        .await
        .expect("Failed to fetch notifications");
    let notifications: Value = resp.json().await.expect("Failed to parse notifications");
    assert!(notifications.as_array().expect("array").is_empty());

    // Clean up the registration so the event never fills up across runs
    let resp = client
        .delete(format!("{}/api/events/{id}/register", base_url()))
        .send()
        .await
        .expect("Failed to withdraw registration");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running fairway server and seeded database"]
async fn test_registration_list_is_staff_only() {
    let client = client();
    register_member(&client).await;
    let event = first_event(&client).await;
    let id = event["id"].as_str().expect("event id").to_owned();

    let resp = client
        .get(format!("{}/api/events/{id}/registrations", base_url()))
        .send()
        .await
        .expect("Failed to fetch registrations");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
