//! HTTP contract tests for the customer API
//!
//! Requests are driven through the full router (CORS, tracing, handlers)
//! with `tower::ServiceExt::oneshot`; no socket is bound.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use customerdb::{
    Customer, CustomerId, CustomerPatch, CustomerStore, FileStore, HttpServer, HttpServerConfig,
    MemoryStore, NewCustomer, SharedStore, StoreError, StoreResult,
};

fn router_over(store: SharedStore) -> Router {
    HttpServer::build_router(&HttpServerConfig::default(), store)
}

fn memory_router() -> Router {
    router_over(Arc::new(MemoryStore::new()))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn alice() -> Value {
    json!({
        "name": "Alice",
        "dateOfBirth": "1990-01-01",
        "memberNumber": 42,
        "interests": "chess"
    })
}

async fn create(router: &Router, body: Value) -> Value {
    let (status, created) = send(router, Method::POST, "/api/customer", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

#[tokio::test]
async fn test_list_empty_store() {
    let router = memory_router();
    let (status, body) = send(&router, Method::GET, "/api/customer", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_get_delete_lifecycle() {
    let router = memory_router();

    let created = create(&router, alice()).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.parse::<CustomerId>().is_ok());

    let mut expected = alice();
    expected["id"] = json!(id);
    assert_eq!(created, expected);

    let uri = format!("/api/customer/{}", id);
    let (status, fetched) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, deleted) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"kind": "not_found", "message": "Customer not found"}));

    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_unknown_id_is_not_found() {
    let router = memory_router();
    let body = json!({"id": CustomerId::generate().to_string(), "name": "Ghost"});

    let (status, response) = send(&router, Method::PUT, "/api/customer", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Customer not found");
    assert_eq!(response["kind"], "not_found");

    let (_, list) = send(&router, Method::GET, "/api/customer", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_put_without_id_is_not_found() {
    let router = memory_router();
    create(&router, alice()).await;

    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/customer",
        Some(json!({"name": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_replaces_supplied_fields() {
    let router = memory_router();
    let created = create(&router, alice()).await;

    let mut edited = created.clone();
    edited["interests"] = json!("go");
    edited["memberNumber"] = json!("43");

    let (status, updated) = send(&router, Method::PUT, "/api/customer", Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Alice");
    assert_eq!(updated["interests"], "go");
    assert_eq!(updated["memberNumber"], 43);
}

#[tokio::test]
async fn test_patch_matches_put_and_accepts_underscore_id() {
    let router = memory_router();
    let created = create(&router, alice()).await;
    let id = created["id"].clone();

    let (status, updated) = send(
        &router,
        Method::PATCH,
        "/api/customer",
        Some(json!({"_id": id.clone(), "dateOfBirth": "1991-02-03T00:00:00.000Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["dateOfBirth"], "1991-02-03");
    assert_eq!(updated["name"], "Alice");

    let uri = format!("/api/customer/{}", id.as_str().unwrap());
    let (_, fetched) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_list_count_tracks_inserts_minus_deletes() {
    let router = memory_router();
    let mut ids = Vec::new();
    for (i, name) in ["Alice", "Bob", "Carol", "Dave"].iter().enumerate() {
        let mut body = alice();
        body["name"] = json!(name);
        body["memberNumber"] = json!(i);
        ids.push(create(&router, body).await["id"].as_str().unwrap().to_string());
    }

    for id in &ids[..2] {
        let (status, _) = send(&router, Method::DELETE, &format!("/api/customer/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, list) = send(&router, Method::GET, "/api/customer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unparseable_path_id_is_not_found() {
    let router = memory_router();
    let (status, body) = send(&router, Method::GET, "/api/customer/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_malformed_body_uses_envelope() {
    let router = memory_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/customer")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let router = memory_router();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/customer",
        Some(json!({"name": "Alice", "memberNumber": 42})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "invalid_request");

    let (_, list) = send(&router, Method::GET, "/api/customer", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let router = memory_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/customer")
        .body(Body::from(alice().to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let router = memory_router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

/// Store whose every call fails
struct BrokenStore;

impl CustomerStore for BrokenStore {
    fn find_by_id(&self, _id: &CustomerId) -> StoreResult<Option<Customer>> {
        Err(StoreError::LockPoisoned)
    }

    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        Err(StoreError::LockPoisoned)
    }

    fn insert(&self, _new: NewCustomer) -> StoreResult<Customer> {
        Err(StoreError::LockPoisoned)
    }

    fn update_by_id(
        &self,
        _id: &CustomerId,
        _patch: CustomerPatch,
    ) -> StoreResult<Option<Customer>> {
        Err(StoreError::LockPoisoned)
    }

    fn delete_by_id(&self, _id: &CustomerId) -> StoreResult<Option<Customer>> {
        Err(StoreError::LockPoisoned)
    }
}

#[tokio::test]
async fn test_store_failures_surface_as_envelopes() {
    let router = router_over(Arc::new(BrokenStore));
    let id = CustomerId::generate().to_string();
    let uri = format!("/api/customer/{}", id);

    let cases = [
        (Method::GET, "/api/customer".to_string(), None, "Error fetching customers"),
        (Method::POST, "/api/customer".to_string(), Some(alice()), "Error creating customer"),
        (
            Method::PUT,
            "/api/customer".to_string(),
            Some(json!({"id": id, "name": "x"})),
            "Error updating customer",
        ),
        (Method::GET, uri.clone(), None, "Error fetching customer"),
        (Method::DELETE, uri, None, "Error deleting customer"),
    ];

    for (method, uri, body, context) in cases {
        let (status, response) = send(&router, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response["kind"], "store_failure");
        assert_eq!(
            response["message"],
            format!("{}: store lock poisoned", context)
        );
    }
}

#[tokio::test]
async fn test_file_backed_router_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let created = {
        let router = router_over(Arc::new(FileStore::open(dir.path()).unwrap()));
        create(&router, alice()).await
    };

    let router = router_over(Arc::new(FileStore::open(dir.path()).unwrap()));
    let uri = format!("/api/customer/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}
