//! HTTP-уровень: валидация и конверт ответа. БД не нужна, все запросы
//! отклоняются до обращения к хранилищу.

mod common;

use axum::http::{Method, StatusCode};
use common::{offline_state, send, test_config};
use venue_booking::router;

#[tokio::test]
async fn health_is_plain_ok() {
    let app = router(offline_state(test_config()));
    let resp = send(&app, Method::GET, "/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "OK");
}

#[tokio::test]
async fn empty_seat_selection_is_a_client_error() {
    let app = router(offline_state(test_config()));
    let body = r#"{
        "customerName": "Ann", "customerEmail": "ann@example.com", "customerPhone": "123",
        "paymentMethod": "cash", "seatIds": [], "totalAmount": 0
    }"#;

    let resp = send(&app, Method::POST, "/api/book", Some(body)).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["success"], false);
    assert_eq!(resp.body["message"], "No seats selected");
    assert!(resp.body.get("data").is_none());
}

#[tokio::test]
async fn missing_customer_fields_are_rejected() {
    let app = router(offline_state(test_config()));
    let body = r#"{"customerName": "Ann", "paymentMethod": "cash", "seatIds": [1]}"#;

    let resp = send(&app, Method::POST, "/api/book", Some(body)).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Missing customer information");
}

#[tokio::test]
async fn overlong_customer_phone_is_a_client_error() {
    let app = router(offline_state(test_config()));
    let body = r#"{
        "customerName": "Ann", "customerEmail": "ann@example.com",
        "customerPhone": "+1 (555) 010-0000 ext. 1234",
        "paymentMethod": "cash", "seatIds": [1], "totalAmount": 50
    }"#;

    let resp = send(&app, Method::POST, "/api/book", Some(body)).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["success"], false);
    assert_eq!(resp.body["message"], "Customer information is too long");
}

#[tokio::test]
async fn malformed_json_uses_the_envelope() {
    let app = router(offline_state(test_config()));
    let resp = send(&app, Method::POST, "/api/book", Some("{not json")).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["success"], false);
    assert_eq!(resp.body["message"], "Invalid request payload");
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = router(offline_state(test_config()));
    let resp = send(&app, Method::GET, "/api/book", None).await;

    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.body["success"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = router(offline_state(test_config()));
    let resp = send(&app, Method::GET, "/api/nope", None).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["success"], false);
}

#[tokio::test]
async fn verify_only_accepts_terminal_statuses() {
    let app = router(offline_state(test_config()));
    let resp = send(
        &app,
        Method::POST,
        "/api/admin/verify",
        Some(r#"{"bookingId": 1, "status": "pending"}"#),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "Status must be either confirmed or cancelled");
}

#[tokio::test]
async fn empty_credentials_are_unauthorized() {
    let app = router(offline_state(test_config()));
    for body in [r#"{"username": "admin"}"#, r#"{"username": "", "password": "admin123"}"#, "{}"] {
        let resp = send(&app, Method::POST, "/api/admin/login", Some(body)).await;

        assert_eq!(resp.status, StatusCode::UNAUTHORIZED, "{}", body);
        assert_eq!(resp.body["success"], false);
        assert_eq!(resp.body["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn admin_routes_require_credentials_when_enabled() {
    let mut config = test_config();
    config.features.enable_admin_auth = true;
    let app = router(offline_state(config));

    let resp = send(&app, Method::GET, "/api/admin/bookings", None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["message"], "Admin credentials required");

    let resp = send(
        &app,
        Method::POST,
        "/api/admin/verify",
        Some(r#"{"bookingId": 1, "status": "confirmed"}"#),
    )
    .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
