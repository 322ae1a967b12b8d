//! Integration tests for registration and login.

mod helpers;

use helpers::{unique, TestApp};
use http::StatusCode;

#[tokio::test]
async fn test_register_success() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("newuser");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "Valid1Password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"]["user_id"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("dupuser");
    app.create_user(&username, "Valid1Password", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": username,
                "email": format!("{username}-other@example.com"),
                "password": "Valid1Password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_weak_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("weakpw");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "alllowercase",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("loginuser");
    app.create_user(&username, "Valid1Password", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "Valid1Password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["token"].is_string());
    assert_eq!(response.body["data"]["user"]["username"], username.as_str());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("badpw");
    app.create_user(&username, "Valid1Password", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": username,
                "password": "Wrong1Password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": unique("nobody"),
                "password": "Valid1Password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("meuser");
    app.create_user(&username, "Valid1Password", "user").await;
    let token = app.login(&username, "Valid1Password").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], username.as_str());
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
