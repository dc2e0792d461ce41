use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN},
    },
};
use garage::config::CorsConfig;
use garage::server::router::{GarageState, garage_router};
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

/// Temp SQLite file backing one test router; removed (with WAL/SHM) on drop.
struct TempDb(PathBuf);

impl Drop for TempDb {
    fn drop(&mut self) {
        let db_path = self.0.to_string_lossy().into_owned();
        let _ = fs::remove_file(format!("{db_path}-wal"));
        let _ = fs::remove_file(format!("{db_path}-shm"));
        let _ = fs::remove_file(&self.0);
    }
}

async fn test_app_with_cors(tag: &str, cors: &CorsConfig) -> (Router, TempDb) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "garage-routes-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let db = garage::db::spawn(&database_url)
        .await
        .expect("failed to spawn db actor");
    (garage_router(GarageState::new(db), cors), TempDb(temp_path))
}

async fn test_app(tag: &str) -> (Router, TempDb) {
    test_app_with_cors(tag, &CorsConfig::default()).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, "POST", "/api/cars", Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let (app, _db) = test_app("roundtrip").await;

    let created = create(&app, json!({"make": "Volvo", "model": "240", "year": 1988})).await;
    let id = created["id"].as_i64().expect("id should be an integer");
    assert_eq!(
        created,
        json!({"id": id, "make": "Volvo", "model": "240", "year": 1988})
    );

    let (status, fetched) = send(&app, "GET", &format!("/api/cars/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Year is optional and comes back as null; a client-supplied id is ignored.
    let second = create(&app, json!({"id": id, "make": "Saab", "model": "900"})).await;
    assert_ne!(second["id"], created["id"]);
    assert_eq!(second["year"], Value::Null);
}

#[tokio::test]
async fn create_reports_all_invalid_fields() {
    let (app, _db) = test_app("invalid").await;

    let (status, body) = send(&app, "POST", "/api/cars", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "make": ["Missing data for required field."],
            "model": ["Missing data for required field."]
        })
    );

    let (status, body) = send(
        &app,
        "POST",
        "/api/cars",
        Some(r#"{"make": "Volvo", "year": "old"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "model": ["Missing data for required field."],
            "year": ["Not a valid integer."]
        })
    );

    let (status, body) = send(&app, "POST", "/api/cars", Some("[1, 2]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"_schema": ["Invalid input type."]}));

    let (status, body) = send(&app, "POST", "/api/cars", Some("not-json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_BODY");

    // Nothing was persisted by the rejected requests.
    let (status, body) = send(&app, "GET", "/api/cars", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let (app, _db) = test_app("update").await;
    let created = create(&app, json!({"make": "Volvo", "model": "240", "year": 1988})).await;
    let uri = format!("/api/cars/{}", created["id"]);

    let (status, updated) = send(&app, "PUT", &uri, Some(r#"{"year": 2020}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["make"], "Volvo");
    assert_eq!(updated["model"], "240");
    assert_eq!(updated["year"], 2020);

    let (status, updated) = send(&app, "PUT", &uri, Some(r#"{"model": "245", "color": "red"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["model"], "245");
    assert_eq!(updated["year"], 2020);

    let (status, updated) = send(&app, "PATCH", &uri, Some(r#"{"year": null}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["year"], Value::Null);

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_rejects_bad_types_on_existing_car() {
    let (app, _db) = test_app("update-invalid").await;
    let created = create(&app, json!({"make": "Volvo", "model": "240"})).await;
    let uri = format!("/api/cars/{}", created["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(r#"{"year": "1999", "make": ""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "make": ["Field may not be blank."],
            "year": ["Not a valid integer."]
        })
    );

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_ids_answer_404_regardless_of_payload() {
    let (app, _db) = test_app("missing").await;

    let (status, _) = send(&app, "GET", "/api/cars/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for body in [r#"{"year": 2020}"#, r#"{"year": "bad"}"#, "not-json", "[]"] {
        let (status, _) = send(&app, "PUT", "/api/cars/999", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT with body {body}");
    }

    let (status, _) = send(&app, "DELETE", "/api/cars/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/cars/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/trucks", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_is_404_and_list_skips_it() {
    let (app, _db) = test_app("delete").await;

    let (status, body) = send(&app, "GET", "/api/cars", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let keep = create(&app, json!({"make": "Saab", "model": "900"})).await;
    let gone = create(&app, json!({"make": "Lada", "model": "Niva", "year": 1977})).await;
    let gone_uri = format!("/api/cars/{}", gone["id"]);

    let (status, body) = send(&app, "DELETE", &gone_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &gone_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &gone_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/cars", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([keep]));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (app, _db) = test_app("request-id").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/cars")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("trace-me")
    );

    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/cars")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("a request id should be generated");
    assert_eq!(generated.len(), 16);
}

#[tokio::test]
async fn ids_must_be_canonical_digits() {
    let (app, _db) = test_app("canonical-id").await;
    let created = create(&app, json!({"make": "Volvo", "model": "240"})).await;
    let id = created["id"].as_i64().expect("id should be an integer");

    let (status, fetched) = send(&app, "GET", &format!("/api/cars/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    for uri in [
        format!("/api/cars/+{id}"),
        format!("/api/cars/0{id}"),
        format!("/api/cars/{id}.0"),
    ] {
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
    }

    let (status, _) = send(&app, "DELETE", &format!("/api/cars/0{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/api/cars/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

async fn preflight(app: &Router, origin: &str) -> (StatusCode, Option<String>) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/cars")
                .header(ORIGIN, origin)
                .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let allowed = resp
        .headers()
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (resp.status(), allowed)
}

#[tokio::test]
async fn cors_allows_only_configured_origins() {
    let cors = CorsConfig {
        // The second entry is not a valid header value and is skipped.
        allow_origins: vec!["http://ok.example".to_string(), "bad\norigin".to_string()],
    };
    let (app, _db) = test_app_with_cors("cors-list", &cors).await;

    let (status, allowed) = preflight(&app, "http://ok.example").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowed.as_deref(), Some("http://ok.example"));

    let (_, allowed) = preflight(&app, "http://evil.example").await;
    assert_eq!(allowed, None);
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let (app, _db) = test_app("cors-any").await;

    let (status, allowed) = preflight(&app, "http://anywhere.example").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowed.as_deref(), Some("*"));
}
