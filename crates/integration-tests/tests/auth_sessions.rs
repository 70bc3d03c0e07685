//! Session lifecycle tests: register, login, logout, and the guards on them.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p fairway-server)
//!
//! Run with: cargo test -p fairway-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use fairway_integration_tests::{TEST_PASSWORD, base_url, client, register_member, unique_email};

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_register_creates_member_and_session() {
    let client = client();
    let session = register_member(&client).await;

    assert_eq!(session["user"]["role"], "member");
    assert_eq!(session["member"]["loyaltyPoints"], 0);
    assert!(
        session["member"]["membershipNumber"]
            .as_str()
            .is_some_and(|n| n.starts_with("FW-")),
        "membership number should be issued at registration"
    );

    // The cookie from registration authenticates /me
    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to fetch current session");

    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = resp.json().await.expect("Failed to parse /me payload");
    assert_eq!(me["user"]["email"], session["user"]["email"]);
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_duplicate_email_conflicts() {
    let client = client();
    let email = unique_email();

    let register = |email: String| {
        client
            .post(format!("{}/api/auth/register", base_url()))
            .json(&json!({
                "email": email,
                "password": TEST_PASSWORD,
                "firstName": "First",
                "lastName": "Member",
            }))
            .send()
    };

    let resp = register(email.clone()).await.expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = register(email).await.expect("Failed to re-register");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_login_rejects_wrong_password() {
    let client = client();
    let session = register_member(&client).await;
    let email = session["user"]["email"].as_str().expect("email").to_owned();

    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({"email": email, "password": "not-the-password"}))
        .send()
        .await
        .expect("Failed to attempt login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running fairway server and database"]
async fn test_logout_ends_the_session() {
    let client = client();
    register_member(&client).await;

    let resp = client
        .post(format!("{}/api/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("Failed to fetch current session");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running fairway server"]
async fn test_protected_routes_require_auth() {
    // A cookie-less client gets 401 everywhere behind the auth wall
    let client = client();

    for path in [
        "/api/auth/me",
        "/api/bookings",
        "/api/menu",
        "/api/orders",
        "/api/loyalty",
        "/api/notifications",
    ] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to request protected route");

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path: {path}");
    }
}
