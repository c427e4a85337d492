use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use labtrack_api::{router, ApiConfig, AppContext};
use labtrack_core::db::open_db_in_memory;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let config = ApiConfig {
        jwt_secret: "integration-test-secret".to_string(),
        ..ApiConfig::default()
    };
    router(AppContext::new(open_db_in_memory().unwrap(), config))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
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
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// Posts `raw` as a JSON body without re-encoding it.
async fn send_raw(app: &Router, uri: &str, token: &str, raw: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register_and_login(app: &Router, username: &str, role: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/register/",
        None,
        Some(json!({"username": username, "password": "correct-horse", "role": role})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/login/",
        None,
        Some(json!({"username": username, "password": "correct-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], role);
    body["access"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn reads_require_a_token() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/labs/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 401);

    let (status, _) = send(&app, Method::GET, "/api/labs/", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_login_returns_flat_error() {
    let app = app();
    register_and_login(&app, "admin", "admin").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login/",
        None,
        Some(json!({"username": "admin", "password": "wrong-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid credentials"}));
}

#[tokio::test]
async fn refresh_token_issues_new_access_token() {
    let app = app();
    register_and_login(&app, "admin", "admin").await;
    let (_, login) = send(
        &app,
        Method::POST,
        "/api/login/",
        None,
        Some(json!({"username": "admin", "password": "correct-horse"})),
    )
    .await;
    let refresh_token = login["refresh"].as_str().unwrap();

    // A refresh token is not an access token.
    let (status, _) = send(&app, Method::GET, "/api/labs/", Some(refresh_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/token/refresh/",
        None,
        Some(json!({"refresh": refresh_token})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access"].as_str().unwrap();
    let (status, _) = send(&app, Method::GET, "/api/labs/", Some(access), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_manages_labs_and_pcs() {
    let app = app();
    let admin = register_and_login(&app, "admin", "admin").await;

    let (status, lab) = send(
        &app,
        Method::POST,
        "/api/labs/",
        Some(&admin),
        Some(json!({"name": "Computer Lab 1", "location": "Block A"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let lab_id = lab["id"].as_i64().unwrap();

    let (status, pc) = send(
        &app,
        Method::POST,
        &format!("/api/labs/{lab_id}/pcs/"),
        Some(&admin),
        Some(json!({"name": "CL1-PC01", "status": "not_working"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pc["lab"], lab_id);

    let (_, detail) = send(
        &app,
        Method::GET,
        &format!("/api/labs/{lab_id}/"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(detail["pc_count"], 1);
    assert_eq!(detail["name"], "Computer Lab 1");

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/api/labs/{lab_id}/"),
        Some(&admin),
        Some(json!({"fans": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["fans"], 4);
    assert_eq!(patched["location"], "Block A");

    let (_, summary) = send(&app, Method::GET, "/api/pcs/summary/", Some(&admin), None).await;
    assert_eq!(summary["totals"]["not_working"], 1);
    assert_eq!(summary["by_lab"][lab_id.to_string()]["total"], 1);

    let (status, filtered) = send(
        &app,
        Method::GET,
        "/api/pcs/?status=working",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered, json!([]));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/labs/{lab_id}/"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/labs/{lab_id}/"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn chart_is_served_as_svg() {
    let app = app();
    let admin = register_and_login(&app, "admin", "admin").await;

    let request = Request::builder()
        .uri("/api/pcs/chart.svg")
        .header(header::AUTHORIZATION, format!("Bearer {admin}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/svg+xml"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let svg = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(svg.contains("No data"));
}

#[tokio::test]
async fn technicians_write_maintenance_but_not_assets() {
    let app = app();
    let admin = register_and_login(&app, "admin", "admin").await;
    let tech = register_and_login(&app, "tech", "technician").await;

    let (_, lab) = send(
        &app,
        Method::POST,
        "/api/labs/",
        Some(&admin),
        Some(json!({"name": "Lab A"})),
    )
    .await;
    let lab_id = lab["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/equipments/",
        Some(&tech),
        Some(json!({"lab": lab_id, "equipment_type": "FAN"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], 403);

    let (status, equipment) = send(
        &app,
        Method::POST,
        "/api/equipments/",
        Some(&admin),
        Some(json!({"lab": lab_id, "equipment_type": "FAN"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, log) = send(
        &app,
        Method::POST,
        "/api/maintenance/",
        Some(&tech),
        Some(json!({"equipment": equipment["id"], "issue_description": "Fan rattles"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["lab"], lab_id);
    assert_eq!(log["status"], "pending");

    let (status, fixed) = send(
        &app,
        Method::PATCH,
        &format!("/api/maintenance/{}/", log["id"]),
        Some(&tech),
        Some(json!({"status": "fixed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(fixed["fixed_on"].as_i64().is_some());

    let (_, pending) = send(
        &app,
        Method::GET,
        "/api/maintenance/?status=pending",
        Some(&tech),
        None,
    )
    .await;
    assert_eq!(pending, json!([]));
}

#[tokio::test]
async fn validation_and_conflicts_use_error_envelope() {
    let app = app();
    let admin = register_and_login(&app, "admin", "admin").await;
    let (_, lab) = send(
        &app,
        Method::POST,
        "/api/labs/",
        Some(&admin),
        Some(json!({"name": "Lab A"})),
    )
    .await;
    let lab_id = lab["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/inventory/",
        Some(&admin),
        Some(json!({
            "lab": lab_id,
            "item_name": "Mouse",
            "total_quantity": 2,
            "working_quantity": 5,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("working_quantity"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/register/",
        None,
        Some(json!({"username": "ADMIN", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::GET, "/api/pcs/?lab=abc", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_raw(&app, "/api/labs/", &admin, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);

    let (status, body) = send(&app, Method::GET, "/api/labs/abc/", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/labs/{lab_id}/pcs/"),
        Some(&admin),
        Some(json!({"name": "pc-01", "status": "broken"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login/",
        None,
        Some(json!({"username": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"].as_str().unwrap().contains("password"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register/",
        None,
        Some(json!({"username": "wizard", "password": "correct-horse", "role": "wizard"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);

    let (status, body) = send(&app, Method::GET, "/api/nowhere/", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn dashboard_reports_counts() {
    let app = app();
    let admin = register_and_login(&app, "admin", "admin").await;
    let (_, lab) = send(
        &app,
        Method::POST,
        "/api/labs/",
        Some(&admin),
        Some(json!({"name": "Lab A"})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/inventory/",
        Some(&admin),
        Some(json!({
            "lab": lab["id"],
            "item_name": "Monitor",
            "total_quantity": 10,
            "working_quantity": 9,
        })),
    )
    .await;

    let (status, stats) = send(&app, Method::GET, "/api/dashboard/", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "total_labs": 1,
            "total_equipment": 10,
            "working_equipment": 9,
            "pending_maintenance": 0
        })
    );
}

#[tokio::test]
async fn second_admin_signup_is_refused() {
    let app = app();
    register_and_login(&app, "admin", "admin").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register/",
        None,
        Some(json!({"username": "mallory", "password": "correct-horse", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().starts_with("role"));
}
