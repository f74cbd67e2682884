//! Shared test harness: app construction and a stub Directus backend.
//!
//! The stub is a small axum app with an in-memory task store bound to an
//! ephemeral port. Every request it receives is recorded so tests can
//! assert on the exact backend traffic (or the absence of it).

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, HeaderName, Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use todozen_web::config::ServerConfig;
use todozen_web::routes;
use todozen_web::state::AppState;

pub const GOOD_TOKEN: &str = "stub-access-token";
pub const GOOD_PASSWORD: &str = "correct horse";
pub const SESSION_COOKIE: &str = "access_token=stub-access-token";

/// One request observed by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct StubState {
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    tasks: Arc<Mutex<BTreeMap<i64, Value>>>,
    next_id: Arc<Mutex<i64>>,
}

impl StubState {
    /// Seed a task directly into the store, bypassing the request log.
    pub fn seed_task(&self, task: Value) {
        let id = task["id"].as_i64().expect("seeded task needs an id");
        self.tasks.lock().unwrap().insert(id, task);
        let mut next = self.next_id.lock().unwrap();
        *next = (*next).max(id + 1);
    }

    pub fn task(&self, id: i64) -> Option<Value> {
        self.tasks.lock().unwrap().get(&id).cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests matching a method and path prefix.
    pub fn requests_matching(&self, method: &str, path_prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path.starts_with(path_prefix))
            .collect()
    }

    fn record(&self, method: &Method, path: &str, query: &str, body: Option<Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            query: query.to_string(),
            body,
        });
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"))
}

fn unauthorized() -> Response<Body> {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "errors": [{ "message": "Invalid user credentials." }] })),
    )
        .into_response()
}

fn envelope(data: Value) -> Response<Body> {
    Json(json!({ "data": data })).into_response()
}

async fn stub_login(
    State(stub): State<StubState>,
    Json(body): Json<Value>,
) -> Response<Body> {
    stub.record(&Method::POST, "/auth/login", "", Some(body.clone()));
    if body["password"].as_str() == Some(GOOD_PASSWORD) {
        envelope(json!({
            "access_token": GOOD_TOKEN,
            "refresh_token": "stub-refresh-token",
        }))
    } else {
        unauthorized()
    }
}

async fn stub_me(State(stub): State<StubState>, headers: HeaderMap) -> Response<Body> {
    stub.record(&Method::GET, "/users/me", "", None);
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    envelope(json!({
        "id": "user-1",
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
    }))
}

async fn stub_register(
    State(stub): State<StubState>,
    Json(body): Json<Value>,
) -> Response<Body> {
    stub.record(&Method::POST, "/users", "", Some(body.clone()));
    if body["email"].as_str() == Some("taken@example.com") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": [{ "message": "Email already taken." }] })),
        )
            .into_response();
    }
    envelope(json!({ "id": "user-2" }))
}

fn matches_search(task: &Value, term: &str) -> bool {
    let term = term.to_lowercase();
    ["title", "description"].iter().any(|field| {
        task[*field]
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(&term))
    })
}

async fn stub_list_tasks(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response<Body> {
    let query = serde_urlencoded::to_string(&params).unwrap_or_default();
    stub.record(&Method::GET, "/items/tasks", &query, None);
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let search = params.iter().find(|(k, _)| k == "search").map(|(_, v)| v);
    let status = params
        .iter()
        .find(|(k, _)| k == "filter[status][_eq]")
        .map(|(_, v)| v);

    let tasks: Vec<Value> = stub
        .tasks
        .lock()
        .unwrap()
        .values()
        .filter(|t| search.is_none_or(|term| matches_search(t, term)))
        .filter(|t| status.is_none_or(|s| t["status"].as_str() == Some(s.as_str())))
        .cloned()
        .collect();

    envelope(Value::Array(tasks))
}

async fn stub_create_task(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response<Body> {
    stub.record(&Method::POST, "/items/tasks", "", Some(body.clone()));
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let id = {
        let mut next = stub.next_id.lock().unwrap();
        if *next == 0 {
            *next = 1;
        }
        let id = *next;
        *next += 1;
        id
    };
    let mut task = body;
    task["id"] = json!(id);
    stub.tasks.lock().unwrap().insert(id, task.clone());
    envelope(task)
}

async fn stub_task_by_id(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    request: Request<Body>,
) -> Response<Body> {
    let method = request.method().clone();
    let path = format!("/items/tasks/{id}");
    let body = request
        .into_body()
        .collect()
        .await
        .ok()
        .map(|b| b.to_bytes())
        .filter(|b| !b.is_empty())
        .and_then(|b| serde_json::from_slice::<Value>(&b).ok());
    stub.record(&method, &path, "", body.clone());

    if !bearer_ok(&headers) {
        return unauthorized();
    }

    match method {
        Method::GET => match stub.task(id) {
            Some(task) => envelope(task),
            None => not_found(),
        },
        Method::PATCH => {
            let mut tasks = stub.tasks.lock().unwrap();
            match tasks.get_mut(&id) {
                Some(task) => {
                    if let Some(patch) = body.as_ref().and_then(Value::as_object) {
                        for (key, value) in patch {
                            task[key] = value.clone();
                        }
                    }
                    envelope(task.clone())
                }
                None => not_found(),
            }
        }
        Method::DELETE => {
            stub.tasks.lock().unwrap().remove(&id);
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

fn not_found() -> Response<Body> {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "errors": [{ "message": "Item not found." }] })),
    )
        .into_response()
}

fn stub_router(stub: StubState) -> Router {
    Router::new()
        .route("/auth/login", post(stub_login))
        .route("/users/me", get(stub_me))
        .route("/users", post(stub_register))
        .route("/items/tasks", get(stub_list_tasks).post(stub_create_task))
        .route(
            "/items/tasks/{id}",
            get(stub_task_by_id)
                .patch(stub_task_by_id)
                .delete(stub_task_by_id),
        )
        .route("/server/ping", get(|| async { "pong" }))
        .with_state(stub)
}

/// Start a stub backend on an ephemeral port; returns its state and URL.
pub async fn spawn_stub_backend() -> (StubState, String) {
    let stub = StubState::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let router = stub_router(stub.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub serve");
    });
    (stub, format!("http://{addr}"))
}

/// Build a test `ServerConfig` pointed at the given stub backend.
pub fn test_config(directus_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        directus_url: directus_url.to_string(),
        request_timeout_secs: 30,
        backend_timeout_secs: 5,
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(directus_url: &str) -> Router {
    let state = AppState::new(test_config(directus_url));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::router())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

/// Spawn a stub backend and build an app wired to it.
pub async fn app_with_stub() -> (Router, StubState) {
    let (stub, url) = spawn_stub_backend().await;
    (build_test_app(&url), stub)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET `uri`, optionally with a `Cookie` header.
pub async fn get_page(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// POST a urlencoded form to `uri`, optionally with a `Cookie` header.
pub async fn post_form(
    app: Router,
    uri: &str,
    cookie: Option<&str>,
    form: &[(&str, &str)],
) -> Response<Body> {
    let body = serde_urlencoded::to_string(form).expect("encode form");
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = builder.body(Body::from(body)).expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Collect a response body into a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("response should carry a Location header")
        .to_str()
        .expect("ascii location")
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().expect("ascii cookie").to_string())
        .collect()
}
