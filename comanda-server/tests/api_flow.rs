//! End-to-end API flow tests against the assembled router

use axum::Router;
use axum::body::Body;
use comanda_server::auth::JwtConfig;
use comanda_server::core::{Config, ServerState, build_app};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        http_port: 0,
        environment: "test".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            ttl_hours: 1,
        },
        tax_rate_percent: 10.0,
        restaurant_id: "r-test".into(),
        feed_capacity: 64,
        default_admin_password: "admin".into(),
        log_dir: None,
    }
}

fn app() -> Router {
    let state = ServerState::initialize(test_config()).unwrap();
    build_app(state)
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/tickets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let wrong_password_message = body["message"].clone();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "nobody", "password": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], wrong_password_message);
}

#[tokio::test]
async fn test_order_lifecycle_to_settlement() {
    let app = app();
    let token = login(&app).await;

    // Submit a cart: 2 pizzas at 250
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "label": "Table 4",
            "items": [
                { "name": "Pizza", "quantity": 2, "price": 250.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["data"]["order"]["id"].as_str().unwrap().to_string();
    let ticket_id = body["data"]["ticket"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["order"]["subtotal"], 500.0);
    assert_eq!(body["data"]["order"]["tax"], 50.0);
    assert_eq!(body["data"]["order"]["total"], 550.0);

    // Kitchen works the ticket forward
    for target in ["PREPARING", "READY"] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/tickets/{ticket_id}/transition"),
            Some(&token),
            Some(json!({ "to": target })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], target);
    }

    // Settle: ticket completes, payment is recorded
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(&token),
        Some(json!({ "payment_method": "CASH" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"]["status"], "COMPLETED");
    assert_eq!(body["data"]["bill"]["total"], 550.0);

    // Revenue is tax-exclusive: 500, not 550
    let (status, body) = send(&app, "GET", "/api/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], 1);
    assert_eq!(body["data"]["pending"], 0);
    assert_eq!(body["data"]["revenue"], 500.0);
}

#[tokio::test]
async fn test_skipping_states_is_rejected() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "label": "Table 1",
            "items": [{ "name": "Cola", "quantity": 1, "price": 40.0 }]
        })),
    )
    .await;
    let ticket_id = body["data"]["ticket"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/tickets/{ticket_id}/transition"),
        Some(&token),
        Some(json!({ "to": "COMPLETED" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");

    // The failed attempt left the ticket untouched
    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/tickets/{ticket_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["status"], "NEW");
}

#[tokio::test]
async fn test_cancelled_ticket_is_final() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "label": "Table 2",
            "items": [{ "name": "Cola", "quantity": 1, "price": 40.0 }]
        })),
    )
    .await;
    let ticket_id = body["data"]["ticket"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/tickets/{ticket_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/tickets/{ticket_id}/transition"),
        Some(&token),
        Some(json!({ "to": "PREPARING" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_kitchen_board_seeds_from_snapshot() {
    let app = app();
    let token = login(&app).await;

    send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "label": "Table 3",
            "items": [{ "name": "Pizza", "quantity": 1, "price": 250.0 }]
        })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/tickets/board", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tickets"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["stats"]["pending"], 1);
}

#[tokio::test]
async fn test_board_excludes_cancelled_tickets() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "label": "Table 5",
            "items": [{ "name": "Pizza", "quantity": 1, "price": 250.0 }]
        })),
    )
    .await;
    let ticket_id = body["data"]["ticket"]["id"].as_str().unwrap().to_string();

    // Cancelled before the board is ever opened: the seed must skip it
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/tickets/{ticket_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/tickets/board", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["tickets"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["stats"]["cancelled"], 1);
}

#[tokio::test]
async fn test_role_management_rules() {
    let app = app();
    let token = login(&app).await;

    // Non-UUID component id is a validation error
    let (status, body) = send(
        &app,
        "POST",
        "/api/roles/manage",
        Some(&token),
        Some(json!({
            "action": "create",
            "name": "waiter",
            "components": ["not-a-uuid"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Built-in roles refuse deletion
    let (_, body) = send(&app, "GET", "/api/roles", Some(&token), None).await;
    let admin_role_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "admin")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/roles/manage",
        Some(&token),
        Some(json!({ "action": "delete", "id": admin_role_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // A role held by an employee refuses deletion and stays listed
    let (status, body) = send(
        &app,
        "POST",
        "/api/roles/manage",
        Some(&token),
        Some(json!({ "action": "create", "name": "waiter" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let waiter_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/employees",
        Some(&token),
        Some(json!({
            "username": "mia",
            "display_name": "Mia",
            "password": "secret123",
            "role_id": waiter_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/roles/manage",
        Some(&token),
        Some(json!({ "action": "delete", "id": waiter_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    let (_, body) = send(&app, "GET", "/api/roles", Some(&token), None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"waiter"));
}

#[tokio::test]
async fn test_menu_crud_roundtrip() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/menu-items",
        Some(&token),
        Some(json!({ "name": "Margherita", "category": "Pizza", "price": 8.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/menu-items/{id}"),
        Some(&token),
        Some(json!({ "available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available"], false);

    let (_, body) = send(&app, "GET", "/api/menu-items?available=true", Some(&token), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/menu-items/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/menu-items/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_items_editable_only_before_preparation() {
    let app = app();
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&token),
        Some(json!({
            "label": "Table 7",
            "items": [{ "name": "Pizza", "quantity": 1, "price": 250.0 }]
        })),
    )
    .await;
    let order_id = body["data"]["order"]["id"].as_str().unwrap().to_string();
    let ticket_id = body["data"]["ticket"]["id"].as_str().unwrap().to_string();

    // Still NEW: amendment allowed, totals recomputed
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/items"),
        Some(&token),
        Some(json!({
            "items": [{ "name": "Pizza", "quantity": 2, "price": 250.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subtotal"], 500.0);

    send(
        &app,
        "POST",
        &format!("/api/tickets/{ticket_id}/transition"),
        Some(&token),
        Some(json!({ "to": "PREPARING" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/items"),
        Some(&token),
        Some(json!({
            "items": [{ "name": "Cola", "quantity": 1, "price": 40.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");
}
