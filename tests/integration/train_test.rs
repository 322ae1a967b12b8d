//! Integration tests for train administration and availability.

mod helpers;

use helpers::{unique, TestApp};
use http::StatusCode;

#[tokio::test]
async fn test_create_train_as_admin() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let admin = unique("admin");
    app.create_user(&admin, "Valid1Password", "admin").await;
    let token = app.login(&admin, "Valid1Password").await;

    let response = app
        .request(
            "POST",
            "/api/trains",
            Some(serde_json::json!({
                "train_name": unique("Express"),
                "source": "Mumbai",
                "destination": "Delhi",
                "total_seats": 100,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["total_seats"], 100);
    assert_eq!(response.body["data"]["available_seats"], 100);
}

#[tokio::test]
async fn test_create_train_requires_admin() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = unique("plainuser");
    app.create_user(&user, "Valid1Password", "user").await;
    let token = app.login(&user, "Valid1Password").await;

    let response = app
        .request(
            "POST",
            "/api/trains",
            Some(serde_json::json!({
                "train_name": unique("Express"),
                "source": "Mumbai",
                "destination": "Delhi",
                "total_seats": 100,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_train_same_source_destination() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let admin = unique("admin");
    app.create_user(&admin, "Valid1Password", "admin").await;
    let token = app.login(&admin, "Valid1Password").await;

    let response = app
        .request(
            "POST",
            "/api/trains",
            Some(serde_json::json!({
                "train_name": unique("Loop"),
                "source": "Mumbai",
                "destination": "mumbai",
                "total_seats": 10,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_lists_trains() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user = unique("viewer");
    app.create_user(&user, "Valid1Password", "user").await;
    let token = app.login(&user, "Valid1Password").await;

    let name = unique("Shatabdi");
    app.create_train(&name, "Pune", "Goa", 42).await;

    let response = app
        .request("GET", "/api/trains/availability", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let trains = response.body["data"].as_array().expect("expected array");
    let found = trains
        .iter()
        .find(|t| t["train_name"] == name.as_str())
        .expect("created train missing from availability");
    assert_eq!(found["available_seats"], 42);
}

#[tokio::test]
async fn test_add_seats_raises_total_and_available() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let admin = unique("admin");
    app.create_user(&admin, "Valid1Password", "admin").await;
    let token = app.login(&admin, "Valid1Password").await;

    let train_id = app
        .create_train(&unique("Rajdhani"), "Delhi", "Kolkata", 50)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/trains/{train_id}/seats"),
            Some(serde_json::json!({ "seats_to_add": 25 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_seats"], 75);
    assert_eq!(response.body["data"]["available_seats"], 75);
}

#[tokio::test]
async fn test_add_seats_unknown_train() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let admin = unique("admin");
    app.create_user(&admin, "Valid1Password", "admin").await;
    let token = app.login(&admin, "Valid1Password").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/trains/{}/seats", uuid::Uuid::new_v4()),
            Some(serde_json::json!({ "seats_to_add": 5 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
