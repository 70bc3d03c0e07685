//! Integration tests for the Fairway club API.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations and seed development data
//! cargo run -p fairway-cli -- migrate
//! cargo run -p fairway-cli -- seed
//!
//! # Start the server
//! cargo run -p fairway-server
//!
//! # Run the (ignored-by-default) integration tests
//! cargo test -p fairway-integration-tests -- --ignored
//! ```
//!
//! Every test registers its own throwaway member, so tests are independent
//! and safe to re-run against the same database.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("FAIRWAY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// An HTTP client with a cookie store, so the session survives across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique throwaway email for a test member.
#[must_use]
pub fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

/// Password used for all test accounts.
pub const TEST_PASSWORD: &str = "integration-test-pw";

/// Register a fresh member and leave the client's session logged in.
///
/// Returns the session payload (`user` + `member`).
///
/// # Panics
///
/// Panics if the server is unreachable or registration fails.
pub async fn register_member(client: &Client) -> Value {
    let resp = client
        .post(format!("{}/api/auth/register", base_url()))
        .json(&json!({
            "email": unique_email(),
            "password": TEST_PASSWORD,
            "firstName": "Integration",
            "lastName": "Test",
        }))
        .send()
        .await
        .expect("Failed to register member");

    assert_eq!(
        resp.status(),
        reqwest::StatusCode::CREATED,
        "registration should succeed"
    );
    resp.json().await.expect("Failed to parse session payload")
}
