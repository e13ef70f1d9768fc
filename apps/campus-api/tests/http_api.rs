//! HTTP contract tests, driving the router without a socket.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use campus_api::{build_router, AppState};
use campus_core::ValidationRules;
use campus_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app(admin_enabled: bool) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(AppState::new(db, ValidationRules::default()), admin_enabled)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn central_cafe() -> Value {
    json!({
        "name": "Central Café",
        "description": "Espresso bar",
        "type": "CAFE",
        "campus": "NORTH",
        "street": "Hauptstraße",
        "houseNumber": "12",
        "postalCode": 69117,
        "city": "Heidelberg"
    })
}

#[tokio::test]
async fn create_returns_201_with_camel_case_body() {
    let app = app(false).await;

    let (status, body) = send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "Central Café");
    assert_eq!(body["type"], "CAFE");
    assert_eq!(body["houseNumber"], "12");
    assert_eq!(body["postalCode"], 69117);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn list_get_and_filter() {
    let app = app(false).await;
    let (_, created) = send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, list) = send(&app, Method::GET, "/api/pos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, one) = send(&app, Method::GET, &format!("/api/pos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one, created);

    let (status, found) = send(
        &app,
        Method::GET,
        "/api/pos/filter?name=Central%20Caf%C3%A9",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);
}

#[tokio::test]
async fn update_returns_200() {
    let app = app(false).await;
    let (_, created) = send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;
    let id = created["id"].as_i64().unwrap();

    let mut body = central_cafe();
    body["description"] = json!("Now open till 9pm");
    let (status, updated) = send(&app, Method::PUT, &format!("/api/pos/{id}"), Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Now open till 9pm");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn error_status_mapping() {
    let app = app(false).await;
    send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;

    // Duplicate
    let (status, body) = send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_NAME");

    // Bad enum value
    let mut bad = central_cafe();
    bad["campus"] = json!("EAST");
    let (status, body) = send(&app, Method::POST, "/api/pos", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field"], "campus");

    // Unknown id
    let (status, body) = send(&app, Method::PUT, "/api/pos/9999", Some(central_cafe())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // Unknown name
    let (status, body) = send(&app, Method::GET, "/api/pos/filter?name=Nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_requests_are_validation_errors() {
    let app = app(false).await;

    let mut wrong_type = central_cafe();
    wrong_type["postalCode"] = json!("69117");
    let (status, body) = send(&app, Method::POST, "/api/pos", Some(wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/pos/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/pos/filter", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn body_id_must_match_path() {
    let app = app(false).await;
    let (_, created) = send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;
    let id = created["id"].as_i64().unwrap();

    let mut body = central_cafe();
    body["id"] = json!(id + 1);
    let (status, err) = send(&app, Method::PUT, &format!("/api/pos/{id}"), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["field"], "id");
}

#[tokio::test]
async fn admin_route_is_absent_by_default() {
    let app = app(false).await;

    let (status, _) = send(&app, Method::DELETE, "/api/admin/pos", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_clear_when_enabled() {
    let app = app(true).await;
    send(&app, Method::POST, "/api/pos", Some(central_cafe())).await;

    let (status, body) = send(&app, Method::DELETE, "/api/admin/pos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 1);

    let (_, body) = send(&app, Method::DELETE, "/api/admin/pos", None).await;
    assert_eq!(body["removed"], 0);

    let (_, list) = send(&app, Method::GET, "/api/pos", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn health_reports_database_state() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let app = build_router(AppState::new(db.clone(), ValidationRules::default()), false);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    db.close().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}
