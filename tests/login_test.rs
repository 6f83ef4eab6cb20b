//! Tests for the login endpoint

mod common;

use common::{create_test_server, create_user};
use knowledgehub_backend::UserStore;
use serde_json::{json, Value};

/// Test: login with an unknown username is a 404
#[tokio::test]
async fn test_login_unknown_user() {
    let (server, _ctx) = create_test_server();

    let response = server
        .post("/api/login")
        .json(&json!({
            "username": "nobody",
            "password": "whatever",
        }))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "User not found");
}

/// Test: wrong password is a 401 carrying only an error field
#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _ctx) = create_test_server();
    create_user(&server, "alice", "correct-password").await;

    let response = server
        .post("/api/login")
        .json(&json!({
            "username": "alice",
            "password": "wrong-password",
        }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid credentials");
    // No user fields leak on failure
    assert!(body.get("id").is_none());
    assert!(body.get("username").is_none());
    assert!(body.get("role").is_none());
}

/// Test: correct credentials return id, username and role
#[tokio::test]
async fn test_login_success() {
    let (server, ctx) = create_test_server();
    create_user(&server, "alice", "correct-password").await;

    let response = server
        .post("/api/login")
        .json(&json!({
            "username": "alice",
            "password": "correct-password",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");

    let stored = ctx.users.find_by_username("alice").unwrap().unwrap();
    assert_eq!(body["id"], stored.id.as_str());
    // The login response never includes the password
    assert!(body.get("password").is_none());
}
