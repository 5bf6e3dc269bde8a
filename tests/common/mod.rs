#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hobbyhub::{
    credentials::{CsrfSource, StaticCsrf},
    navigate::RecordingNavigator,
    ApiClient, Store,
};
use reqwest::Url;
use serde_json::{json, Value};
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

pub const TOKEN: &str = "mock-csrf-token";
const USER: &str = "user";

/// In-memory stand-in for the remote API.
pub struct MockState {
    /// `METHOD /path?query` for every request that reached the server.
    pub requests: Vec<String>,
    pub user: Value,
    pub hobbies: Vec<Value>,
    pub similar: Value,
    /// Answer `GET /api/profile/` with this status instead of the user.
    pub profile_status: Option<StatusCode>,
    /// Answer `GET /api/hobbies/` with this status instead of the list.
    pub hobbies_status: Option<StatusCode>,
    /// Answer hobby writes with `{"status": "error", "errors": ...}`.
    pub reject_with: Option<Value>,
    /// Answer `PUT /api/profile/` with 400 and these errors.
    pub update_errors: Option<Value>,
    /// Answer `PUT /api/profile/` with 200 and this body, changing nothing.
    pub update_reply: Option<Value>,
    pub updates: Vec<Value>,
    pub friend_requests: Vec<String>,
    next_hobby_id: i64,
}

impl Default for MockState {
    fn default() -> Self {
        let hobbies = vec![
            hobby(1, "Climbing", Some("lee")),
            hobby(2, "Painting", None),
            hobby(3, "Go", Some("maria")),
        ];
        MockState {
            requests: Vec::new(),
            user: json!({
                "id": 1,
                "first_name": "Maria",
                "last_name": "Lopez",
                "username": "maria",
                "email": "maria@example.com",
                "date_of_birth": "1999-03-14",
                "profile": {},
                "hobbies": [hobbies[0].clone()],
                "age": 25,
            }),
            hobbies,
            similar: json!({ "similar_users": [], "page": 1, "total_pages": 1 }),
            profile_status: None,
            hobbies_status: None,
            reject_with: None,
            update_errors: None,
            update_reply: None,
            updates: Vec::new(),
            friend_requests: Vec::new(),
            next_hobby_id: 4,
        }
    }
}

pub fn hobby(id: i64, name: &str, created_by: Option<&str>) -> Value {
    json!({ "id": id, "name": name, "created_at": "2024-10-17 10:00", "created_by": created_by })
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub base: Url,
    pub state: Shared,
}

impl MockApi {
    pub async fn spawn() -> MockApi {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));

        let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

        let app = Router::new()
            .route("/login/", post(login))
            .route("/api/profile/", get(get_profile).put(put_profile))
            .route("/api/hobbies/", get(get_hobbies).post(create_hobby))
            .route("/api/profile/add_hobby", post(add_hobby))
            .route("/api/profile/delete_hobby", post(delete_hobby))
            .route("/api/users/similar_with_filters/", get(similar_users))
            .route("/api/send_request/", post(send_request))
            .with_state(state.clone())
            .layer(session_layer)
            .layer(middleware::from_fn_with_state(state.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi {
            base: Url::parse(&format!("http://{addr}/")).unwrap(),
            state,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }
}

pub struct Harness {
    pub mock: MockApi,
    pub store: Store,
    pub navigator: Arc<RecordingNavigator>,
}

/// Logged-in session: the jar holds the session cookie and `csrftoken`,
/// and the request log starts empty.
pub async fn logged_in() -> Harness {
    let mock = MockApi::spawn().await;
    let api = ApiClient::new(mock.base.clone()).unwrap();
    api.http()
        .post(mock.base.join("login/").unwrap())
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let csrf = Arc::new(api.cookie_csrf());
    harness(mock, api, csrf).await
}

/// Session cookie present but no CSRF token available.
pub async fn without_token() -> Harness {
    let mock = MockApi::spawn().await;
    let api = ApiClient::new(mock.base.clone()).unwrap();
    api.http()
        .post(mock.base.join("login/").unwrap())
        .send()
        .await
        .unwrap();

    harness(mock, api, Arc::new(StaticCsrf::missing())).await
}

/// Never logged in.
pub async fn anonymous() -> Harness {
    let mock = MockApi::spawn().await;
    let api = ApiClient::new(mock.base.clone()).unwrap();
    harness(mock, api, Arc::new(StaticCsrf::token(TOKEN))).await
}

async fn harness(mock: MockApi, api: ApiClient, csrf: Arc<dyn CsrfSource>) -> Harness {
    mock.with(|s| s.requests.clear());
    let navigator = Arc::new(RecordingNavigator::default());
    let store = Store::new(api, csrf, navigator.clone());
    Harness { mock, store, navigator }
}

async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let target = req.uri().path_and_query().map(|pq| pq.as_str().to_owned()).unwrap_or_default();
    state.lock().unwrap().requests.push(format!("{} {}", req.method(), target));
    next.run(req).await
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

async fn login(session: Session) -> Response {
    session.insert(USER, "maria").await.unwrap();
    (
        [(SET_COOKIE, format!("csrftoken={TOKEN}; Path=/"))],
        Json(json!({ "status": "success" })),
    ).into_response()
}

async fn require_login(session: &Session) -> Result<String, Response> {
    match session.get::<String>(USER).await.unwrap() {
        Some(user) => Ok(user),
        None => Err(reply(StatusCode::UNAUTHORIZED, json!({ "detail": "Authentication required" }))),
    }
}

fn require_csrf(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("x-csrftoken").and_then(|v| v.to_str().ok()) {
        Some(TOKEN) => Ok(()),
        _ => Err(reply(StatusCode::FORBIDDEN, json!({ "detail": "CSRF verification failed" }))),
    }
}

async fn get_profile(State(state): State<Shared>, session: Session) -> Response {
    let forced = state.lock().unwrap().profile_status;
    if let Some(status) = forced {
        return reply(status, json!({ "detail": "nope" }));
    }
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    Json(state.lock().unwrap().user.clone()).into_response()
}

async fn put_profile(
    State(state): State<Shared>,
    session: Session,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }

    let mut state = state.lock().unwrap();
    state.updates.push(body.clone());
    if let Some(errors) = state.update_errors.clone() {
        return reply(StatusCode::BAD_REQUEST, json!({ "status": "error", "errors": errors }));
    }
    if let Some(body) = state.update_reply.clone() {
        return reply(StatusCode::OK, body);
    }

    let Value::Object(fields) = body else {
        return reply(StatusCode::BAD_REQUEST, json!({ "status": "error", "message": "Invalid JSON format" }));
    };
    for (key, value) in fields {
        let value = if key == "hobbies" {
            let ids: Vec<i64> = serde_json::from_value(value).unwrap();
            let hobbies: Vec<Value> = state.hobbies.iter()
                .filter(|h| ids.contains(&h["id"].as_i64().unwrap()))
                .cloned()
                .collect();
            Value::Array(hobbies)
        } else {
            value
        };
        state.user[key] = value;
    }
    reply(StatusCode::OK, json!({ "status": "success" }))
}

async fn get_hobbies(State(state): State<Shared>, session: Session) -> Response {
    let forced = state.lock().unwrap().hobbies_status;
    if let Some(status) = forced {
        return reply(status, json!({ "detail": "nope" }));
    }
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    Json(json!({ "hobbies": state.lock().unwrap().hobbies.clone() })).into_response()
}

async fn create_hobby(
    State(state): State<Shared>,
    session: Session,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let user = match require_login(&session).await {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }

    let mut state = state.lock().unwrap();
    if let Some(errors) = state.reject_with.clone() {
        return reply(StatusCode::OK, json!({ "status": "error", "errors": errors }));
    }

    let id = state.next_hobby_id;
    state.next_hobby_id += 1;
    let created = hobby(id, body["name"].as_str().unwrap(), Some(user.as_str()));
    state.hobbies.push(created.clone());
    reply(StatusCode::OK, json!({ "status": "success", "hobby": created }))
}

async fn add_hobby(
    State(state): State<Shared>,
    session: Session,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }

    let mut state = state.lock().unwrap();
    if let Some(errors) = state.reject_with.clone() {
        return reply(StatusCode::OK, json!({ "status": "error", "errors": errors }));
    }

    let id = body["hobby_id"].as_i64().unwrap();
    let Some(found) = state.hobbies.iter().find(|h| h["id"] == id).cloned() else {
        return reply(StatusCode::OK, json!({ "status": "error", "errors": "Hobby not found" }));
    };
    state.user["hobbies"].as_array_mut().unwrap().push(found);
    reply(StatusCode::OK, json!({ "status": "success" }))
}

async fn delete_hobby(
    State(state): State<Shared>,
    session: Session,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }

    let mut state = state.lock().unwrap();
    if let Some(errors) = state.reject_with.clone() {
        return reply(StatusCode::OK, json!({ "status": "error", "errors": errors }));
    }

    let id = body["hobby_id"].as_i64().unwrap();
    state.user["hobbies"].as_array_mut().unwrap().retain(|h| h["id"] != id);
    reply(StatusCode::OK, json!({ "status": "success" }))
}

async fn similar_users(State(state): State<Shared>, session: Session) -> Response {
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    Json(state.lock().unwrap().similar.clone()).into_response()
}

async fn send_request(
    State(state): State<Shared>,
    session: Session,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_login(&session).await {
        return resp;
    }
    if let Err(resp) = require_csrf(&headers) {
        return resp;
    }

    let username = body["username"].as_str().unwrap_or_default().to_owned();
    if username == "ghost" {
        return reply(StatusCode::NOT_FOUND, json!({ "status": "error", "message": "User not found" }));
    }
    state.lock().unwrap().friend_requests.push(username);
    reply(StatusCode::OK, json!({ "status": "success" }))
}
