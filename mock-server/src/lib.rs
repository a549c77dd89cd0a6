//! Todo API built on `fapi-server`, used to exercise the client end to end.
//!
//! Every handler answers through the configured `Envelope` and reports
//! failures as `Failure`s; `dispatch_errors` writes them.

pub mod config;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use fapi_server::{dispatch_errors, Envelope, Failure, ResponseError, ValidatedJson};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodo {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTodo {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Todo>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    envelope: Envelope,
}

pub fn app(envelope: Envelope) -> Router {
    let state = AppState {
        db: Db::default(),
        envelope,
    };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(from_fn(dispatch_errors))
        .with_state(state)
}

pub async fn run(listener: TcpListener, envelope: Envelope) -> Result<(), std::io::Error> {
    axum::serve(listener, app(envelope)).await
}

/// Ids are taken as `Path<String>` and parsed here so a malformed id is a
/// `parse_error` in the envelope rather than axum's own path rejection.
fn parse_id(raw: &str) -> Result<Uuid, ResponseError> {
    Uuid::parse_str(raw).map_err(|_| ResponseError::parse_error("invalid todo id"))
}

fn not_found() -> ResponseError {
    ResponseError::resource_not_found("todo")
}

async fn list_todos(State(state): State<AppState>) -> Response {
    let todos = state.db.read().await;
    state.envelope.respond(todos.values().cloned().collect::<Vec<_>>())
}

async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateTodo>,
) -> Response {
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        completed: input.completed,
    };
    state.db.write().await.insert(todo.id, todo.clone());
    (StatusCode::CREATED, state.envelope.respond(todo)).into_response()
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Failure> {
    let id = parse_id(&id)?;
    let todos = state.db.read().await;
    let todo = todos.get(&id).ok_or_else(not_found)?;
    Ok(state.envelope.respond(todo))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTodo>,
) -> Result<Response, Failure> {
    let id = parse_id(&id)?;
    let mut todos = state.db.write().await;
    let todo = todos.get_mut(&id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(state.envelope.respond(&*todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Failure> {
    let id = parse_id(&id)?;
    let mut todos = state.db.write().await;
    todos.remove(&id).ok_or_else(not_found)?;
    Ok(state.envelope.respond_ok())
}
