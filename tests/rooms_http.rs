//! HTTP behaviour of the rooms API against a scripted repository.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::Database;
use serde_json::Value;
use tower::ServiceExt;

use rooms_service::create_api_router;
use rooms_service::domain::query::{
    FilterOperator, ListQuery, PageMeta, PaginatedResult, QueryError, SortDirection,
};
use rooms_service::domain::{RepositoryProvider, Room, RoomRepository};

struct ScriptedRooms {
    outcome: Result<(Vec<Room>, u64), QueryError>,
    seen: Mutex<Vec<ListQuery>>,
}

#[async_trait]
impl RoomRepository for ScriptedRooms {
    async fn find_page(&self, query: &ListQuery) -> Result<PaginatedResult<Room>, QueryError> {
        self.seen.lock().unwrap().push(query.clone());
        let (rooms, total) = self.outcome.clone()?;
        Ok(PaginatedResult::new(
            rooms,
            PageMeta::new(&query.pagination, total),
        ))
    }
}

struct Provider(Arc<ScriptedRooms>);

impl RepositoryProvider for Provider {
    fn rooms(&self) -> &dyn RoomRepository {
        self.0.as_ref()
    }
}

fn room(id: i32, name: &str, capacity: i32) -> Room {
    let now = Utc::now();
    Room {
        id,
        name: name.to_string(),
        capacity,
        user_id: 1,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

async fn app(outcome: Result<(Vec<Room>, u64), QueryError>) -> (Router, Arc<ScriptedRooms>) {
    let rooms = Arc::new(ScriptedRooms {
        outcome,
        seen: Mutex::new(Vec::new()),
    });
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let router = create_api_router(Arc::new(Provider(rooms.clone())), db, handle);
    (router, rooms)
}

fn rooms_uri(params: &[(&str, &str)]) -> String {
    format!("/api/v1/rooms?{}", serde_urlencoded::to_string(params).unwrap())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn lists_rooms_in_an_envelope() {
    let (router, rooms) = app(Ok((vec![room(1, "Auditorium", 40)], 1))).await;

    let uri = rooms_uri(&[
        ("page", "1"),
        ("limit", "10"),
        ("filters", r#"[{"field":"capacity","operator":"gte","value":10}]"#),
        ("sort", r#"[{"field":"name","order":"ASC"}]"#),
    ]);
    let (status, json) = get(router, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["statusCode"], 200);
    assert_eq!(json["message"], "Rooms retrieved successfully");
    assert_eq!(json["path"], "/api/v1/rooms");
    assert_eq!(json["data"]["items"][0]["name"], "Auditorium");
    assert_eq!(json["data"]["meta"]["itemCount"], 1);
    assert_eq!(json["data"]["meta"]["pageCount"], 1);
    assert_eq!(json["data"]["meta"]["hasNext"], false);
    assert_eq!(json["data"]["meta"]["hasPrevious"], false);

    let seen = rooms.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].filters[0].field(), "capacity");
    assert_eq!(seen[0].filters[0].operator(), FilterOperator::Gte);
    assert_eq!(seen[0].sorts[0].direction(), SortDirection::Asc);
}

#[tokio::test]
async fn defaults_apply_without_parameters() {
    let (router, rooms) = app(Ok((vec![], 0))).await;
    let (status, json) = get(router, "/api/v1/rooms").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "No rooms found");
    assert_eq!(json["data"]["meta"]["page"], 1);
    assert_eq!(json["data"]["meta"]["limit"], 10);
    assert_eq!(json["data"]["meta"]["itemCount"], 0);

    let seen = rooms.seen.lock().unwrap();
    assert!(seen[0].filters.is_empty());
    assert!(seen[0].sorts.is_empty());
}

#[tokio::test]
async fn unsupported_operator_is_a_bad_request() {
    let (router, rooms) = app(Ok((vec![], 0))).await;
    let uri = rooms_uri(&[("filters", r#"[{"field":"name","operator":"between","value":1}]"#)]);
    let (status, json) = get(router, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 400);
    assert_eq!(json["message"], "Unsupported operator: between");
    assert!(json.get("data").is_none());
    assert!(rooms.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (router, _) = app(Ok((vec![], 0))).await;
    let (status, json) = get(router, &rooms_uri(&[("sort", "[{oops")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid JSON format for filters or sort");
}

#[tokio::test]
async fn unknown_field_is_a_bad_request() {
    let (router, rooms) = app(Ok((vec![], 0))).await;
    let uri = rooms_uri(&[("filters", r#"[{"field":"deleted_at","operator":"isNull"}]"#)]);
    let (status, json) = get(router, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Unknown filter field: deleted_at");
    assert!(rooms.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pagination_bounds_are_enforced() {
    let (router, _) = app(Ok((vec![], 0))).await;
    let (status, json) = get(router.clone(), "/api/v1/rooms?limit=51").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["path"], "/api/v1/rooms");

    let (status, _) = get(router.clone(), "/api/v1/rooms?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(router, "/api/v1/rooms?page=two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_is_a_500_envelope() {
    let (router, _) = app(Err(QueryError::Execution("database is locked".into()))).await;
    let (status, json) = get(router, "/api/v1/rooms").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 500);
    assert_eq!(json["message"], "database is locked");
    assert_eq!(json["path"], "/api/v1/rooms");
}

#[tokio::test]
async fn timeout_is_a_504_envelope() {
    let (router, _) = app(Err(QueryError::Timeout(Duration::from_millis(250)))).await;
    let (status, json) = get(router, "/api/v1/rooms").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["message"], "Query timed out after 250ms");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (router, _) = app(Ok((vec![], 0))).await;
    let req = Request::builder()
        .uri("/api/v1/rooms")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["x-request-id"], "abc-123");

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_database() {
    let (router, _) = app(Ok((vec![], 0))).await;
    let (status, json) = get(router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"]["status"], "ok");
}

#[tokio::test]
async fn metrics_and_openapi_are_served() {
    let (router, _) = app(Ok((vec![], 0))).await;

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let (status, json) = get(router, "/api-doc/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/v1/rooms"].is_object());
}
