use axum::http::{self, Request, StatusCode};
use fapi_server::Envelope;
use http_body_util::BodyExt;
use mock_server::{app, Todo};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const MISSING: &str = "/todos/00000000-0000-0000-0000-000000000000";

// --- list ---

#[tokio::test]
async fn list_todos_empty_wrapped() {
    let resp = app(Envelope::Wrapped)
        .oneshot(empty_request("GET", "/todos"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"data": []}));
}

#[tokio::test]
async fn list_todos_empty_bare() {
    let resp = app(Envelope::Bare)
        .oneshot(empty_request("GET", "/todos"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201() {
    let resp = app(Envelope::Bare)
        .oneshot(json_request("POST", "/todos", r#"{"title":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_with_empty_title_returns_field_errors() {
    let resp = app(Envelope::Wrapped)
        .oneshot(json_request("POST", "/todos", r#"{"title":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": {
            "name": "ValidationError",
            "code": "field_errors",
            "message": "errors in fields",
            "data": {"title": [{"code": "length", "message": "length"}]}
        }})
    );
}

#[tokio::test]
async fn create_todo_wrong_shape_returns_server_error() {
    let resp = app(Envelope::Wrapped)
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": {"name": "ServerError", "code": "server_error"}})
    );
}

#[tokio::test]
async fn create_todo_malformed_json_returns_server_error() {
    let resp = app(Envelope::Wrapped)
        .oneshot(json_request("POST", "/todos", r#"{"title":"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"]["code"], "server_error");
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app(Envelope::Wrapped)
        .oneshot(empty_request("GET", MISSING))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": {
            "name": "ResourceNotFoundError",
            "code": "todo_not_found",
            "message": "todo not found"
        }})
    );
}

#[tokio::test]
async fn get_todo_bad_uuid_returns_422() {
    let resp = app(Envelope::Wrapped)
        .oneshot(empty_request("GET", "/todos/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"]["code"], "parse_error");
    assert_eq!(body["error"]["message"], "invalid todo id");
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app(Envelope::Wrapped)
        .oneshot(json_request("PUT", MISSING, r#"{"title":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app(Envelope::Wrapped)
        .oneshot(empty_request("DELETE", MISSING))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle_wrapped() {
    use tower::Service;

    let mut app = app(Envelope::Wrapped).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/todos", r#"{"title":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    assert_eq!(created["data"]["title"], "Walk dog");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // update, partial: only completed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"completed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = body_json(resp).await;
    assert_eq!(updated["data"]["title"], "Walk dog"); // unchanged
    assert_eq!(updated["data"]["completed"], true);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"data": {"result": "ok"}}));

    // get after delete is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn crud_lifecycle_bare() {
    use tower::Service;

    let mut app = app(Envelope::Bare).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/todos",
            r#"{"title":"Already done","completed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    assert!(created.completed);
    let id = created.id;

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched.id, id);

    // list should contain the one todo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);

    // bare envelope answers delete with an empty body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete is empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}
