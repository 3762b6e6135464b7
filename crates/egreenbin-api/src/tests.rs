//! HTTP-level tests for the API router against `MemoryStore`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use egreenbin_core::{
  Document, DocumentId, Resource,
  comment::Comment,
  store::DocumentStore,
  student::Student,
};
use egreenbin_store_memory::MemoryStore;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{Envelope, Status, api_router};

fn app(store: &MemoryStore) -> Router {
  Router::new().nest("/api", api_router(Arc::new(store.clone())))
}

async fn send(
  app: Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(json) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(json.to_string())
    }
    None => Body::empty(),
  };
  app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn read<T: DeserializeOwned>(resp: Response) -> T {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn create_comment(store: &MemoryStore, body: Value) -> Document<Comment> {
  let resp = send(app(store), "POST", "/api/comments", Some(body)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  read::<Envelope<Document<Comment>>>(resp).await.data
}

// ── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_with_envelope() {
  let store = MemoryStore::new();
  let resp = send(
    app(&store),
    "POST",
    "/api/comments",
    Some(json!({ "content": "nice bin", "type": "praise" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body: Value = read(resp).await;
  assert_eq!(body["status"], "success");
  assert_eq!(body["message"], "Comment has been created.");
  let data = &body["data"];
  let id = data["id"].as_str().unwrap();
  assert_eq!(id.len(), 24);
  assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
  assert_eq!(data["content"], "nice bin");
  assert_eq!(data["type"], "praise");
  assert_eq!(data["student"], "");
  assert_eq!(data["dateCreated"], data["dateUpdated"]);
}

#[tokio::test]
async fn create_ignores_client_supplied_id_and_timestamps() {
  let store = MemoryStore::new();
  let supplied = "64b7f0c2a1d3e4f5a6b7c8d9";
  let created = create_comment(
    &store,
    json!({
      "id": supplied,
      "content": "mine",
      "dateCreated": "2000-01-01T00:00:00Z",
    }),
  )
  .await;
  assert_ne!(created.id.to_string(), supplied);
  assert!(created.date_created.timestamp() > 946_684_800);
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
  let store = MemoryStore::new();
  let req = Request::builder()
    .method("POST")
    .uri("/api/comments")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"content\": "))
    .unwrap();
  let resp = app(&store).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Envelope<()> = read(resp).await;
  assert_eq!(body.status, Status::Error);
  assert!(!body.message.is_empty());
}

#[tokio::test]
async fn create_with_ill_typed_field_returns_400() {
  let store = MemoryStore::new();
  let resp = send(
    app(&store),
    "POST",
    "/api/students",
    Some(json!({ "name": "Lan", "numOfCorrect": "lots" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Envelope<()> = read(resp).await;
  assert!(body.message.contains("numOfCorrect"), "{}", body.message);
}

#[tokio::test]
async fn create_without_content_type_returns_400() {
  let store = MemoryStore::new();
  let req = Request::builder()
    .method("POST")
    .uri("/api/comments")
    .body(Body::from(r#"{"content":"x"}"#))
    .unwrap();
  let resp = app(&store).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Get / list ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_returns_the_created_document() {
  let store = MemoryStore::new();
  let created = create_comment(&store, json!({ "content": "nice bin" })).await;

  let resp = send(
    app(&store),
    "GET",
    &format!("/api/comments/{}", created.id),
    None,
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Envelope<Document<Comment>> = read(resp).await;
  assert_eq!(body.status, Status::Success);
  assert_eq!(body.data, created);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
  let store = MemoryStore::new();
  let resp = send(
    app(&store),
    "GET",
    &format!("/api/comments/{}", DocumentId::generate()),
    None,
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Envelope<()> = read(resp).await;
  assert_eq!(body.status, Status::Error);
}

#[tokio::test]
async fn list_returns_every_document_of_the_resource() {
  let store = MemoryStore::new();
  create_comment(&store, json!({ "content": "one" })).await;
  create_comment(&store, json!({ "content": "two" })).await;
  send(app(&store), "POST", "/api/students", Some(json!({ "code": "S1" })))
    .await;

  let resp = send(app(&store), "GET", "/api/comments", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Envelope<Vec<Document<Comment>>> = read(resp).await;
  assert_eq!(body.data.len(), 2);

  let resp = send(app(&store), "GET", "/api/students", None).await;
  let body: Envelope<Vec<Document<Student>>> = read(resp).await;
  assert_eq!(body.data.len(), 1);
  assert_eq!(body.data[0].fields.code, "S1");
}

// ── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_allow_listed_fields_only() {
  let store = MemoryStore::new();
  let created = create_comment(
    &store,
    json!({ "student": "S1", "content": "nice bin", "type": "praise" }),
  )
  .await;
  let uri = format!("/api/comments/{}", created.id);

  let resp = send(
    app(&store),
    "PUT",
    &uri,
    Some(json!({
      "content": "updated",
      "id": "64b7f0c2a1d3e4f5a6b7c8d9",
      "dateCreated": "2000-01-01T00:00:00Z",
      "rating": 5,
    })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  assert!(bytes.is_empty());

  let resp = send(app(&store), "GET", &uri, None).await;
  let updated: Envelope<Value> = read(resp).await;
  let data = updated.data;
  assert_eq!(data["content"], "updated");
  assert_eq!(data["student"], "S1");
  assert_eq!(data["type"], "praise");
  assert_eq!(data["id"], created.id.to_string());
  assert!(data.get("rating").is_none());

  let updated: Document<Comment> = serde_json::from_value(data).unwrap();
  assert_eq!(updated.date_created, created.date_created);
  assert!(updated.date_updated > created.date_updated);
}

#[tokio::test]
async fn update_student_counters() {
  let store = MemoryStore::new();
  let resp = send(
    app(&store),
    "POST",
    "/api/students",
    Some(json!({ "code": "S1", "name": "Lan", "numOfCorrect": 1 })),
  )
  .await;
  let created: Envelope<Document<Student>> = read(resp).await;
  let uri = format!("/api/students/{}", created.data.id);

  let resp = send(
    app(&store),
    "PUT",
    &uri,
    Some(json!({ "numOfCorrect": 2, "numOfWrong": 1 })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(app(&store), "GET", &uri, None).await;
  let student: Envelope<Document<Student>> = read(resp).await;
  assert_eq!(student.data.fields.num_of_correct, 2);
  assert_eq!(student.data.fields.num_of_wrong, 1);
  assert_eq!(student.data.fields.name, "Lan");
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
  let store = MemoryStore::new();
  let resp = send(
    app(&store),
    "PUT",
    &format!("/api/comments/{}", DocumentId::generate()),
    Some(json!({ "content": "x" })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_ill_typed_body_returns_400() {
  let store = MemoryStore::new();
  let created = create_comment(&store, json!({ "content": "x" })).await;
  let resp = send(
    app(&store),
    "PUT",
    &format!("/api/comments/{}", created.id),
    Some(json!({ "content": 42 })),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_get_returns_404_and_delete_is_idempotent() {
  let store = MemoryStore::new();
  let created = create_comment(&store, json!({ "content": "bye" })).await;
  let uri = format!("/api/comments/{}", created.id);

  let resp = send(app(&store), "DELETE", &uri, None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(app(&store), "GET", &uri, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(app(&store), "DELETE", &uri, None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// ── Malformed ids ───────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_id_returns_400_on_every_item_route() {
  let store = MemoryStore::new();
  for (method, body) in [
    ("GET", None),
    ("PUT", Some(json!({ "content": "x" }))),
    ("DELETE", None),
  ] {
    let resp = send(app(&store), method, "/api/comments/abc", body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method}");
    let body: Envelope<()> = read(resp).await;
    assert!(body.message.contains("abc"), "{method}: {}", body.message);
  }
}

#[tokio::test]
async fn undecodable_id_segment_returns_400_envelope() {
  let store = MemoryStore::new();
  for method in ["GET", "DELETE"] {
    let resp = send(app(&store), method, "/api/comments/%FF", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method}");
    let body: Envelope<()> = read(resp).await;
    assert_eq!(body.status, Status::Error, "{method}");
    assert!(body.message.contains("UTF-8"), "{method}: {}", body.message);
  }
}

// ── Store failures ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
struct Unavailable;

/// A store whose every operation fails.
struct FailingStore;

impl DocumentStore for FailingStore {
  type Error = Unavailable;

  async fn list<R: Resource>(&self) -> Result<Vec<Document<R>>, Unavailable> {
    Err(Unavailable)
  }

  async fn get<R: Resource>(
    &self,
    _id: DocumentId,
  ) -> Result<Option<Document<R>>, Unavailable> {
    Err(Unavailable)
  }

  async fn insert<R: Resource>(
    &self,
    _fields: R,
  ) -> Result<Document<R>, Unavailable> {
    Err(Unavailable)
  }

  async fn update<R: Resource>(
    &self,
    _id: DocumentId,
    _patch: R::Patch,
  ) -> Result<bool, Unavailable> {
    Err(Unavailable)
  }

  async fn delete<R: Resource>(
    &self,
    _id: DocumentId,
  ) -> Result<bool, Unavailable> {
    Err(Unavailable)
  }
}

#[tokio::test]
async fn store_failures_return_500_on_every_route() {
  let app = Router::new().nest("/api", api_router(Arc::new(FailingStore)));
  let id = DocumentId::generate();
  let item = format!("/api/comments/{id}");

  for (method, uri, body) in [
    ("GET", "/api/comments", None),
    ("POST", "/api/comments", Some(json!({ "content": "x" }))),
    ("GET", item.as_str(), None),
    ("PUT", item.as_str(), Some(json!({ "content": "x" }))),
    ("DELETE", item.as_str(), None),
  ] {
    let resp = send(app.clone(), method, uri, body).await;
    assert_eq!(
      resp.status(),
      StatusCode::INTERNAL_SERVER_ERROR,
      "{method} {uri}"
    );
    let body: Envelope<()> = read(resp).await;
    assert_eq!(body.status, Status::Error);
    assert!(body.message.contains("connection reset"));
  }
}
