//! In-process stand-in for the platform backend.
//!
//! Serves canned responses for every endpoint the client library calls,
//! records each request it receives, and can be switched into a failure mode
//! where every route answers 500 with `{"error": "Fake mock server error."}`.

pub mod fixtures;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::api::segment;
use crate::types::UserType;
use fixtures::*;

/// One request as the mock saw it
#[derive(Debug, Clone, Serialize)]
pub struct RecordedRequest {
    pub id: Uuid,
    pub method: String,
    /// Path plus query string, still percent-encoded
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    fail: AtomicBool,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Clone, Default)]
pub struct MockState {
    inner: Arc<Inner>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let state = Self::default();
        state.set_failing(true);
        state
    }

    pub fn set_failing(&self, fail: bool) {
        self.inner.fail.store(fail, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.inner.fail.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().last().cloned()
    }

    pub fn clear_requests(&self) {
        self.lock().clear();
    }

    fn record(&self, request: RecordedRequest) {
        self.lock().push(request);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.inner.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Full route table with recording, CORS and tracing layers
pub fn router(state: MockState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(course_routes())
        .merge(project_routes())
        .merge(profile_routes())
        .merge(admin_routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, record_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    Router::new()
        .route("/login", post(|| reply(login_grant())))
        .route(
            "/register",
            post(|| reply(message("Successful registration, verify account now."))),
        )
        .route("/verifyCode", post(|| reply(verify_grant())))
        .route("/logout", post(|| reply(message("logged out"))))
        .route("/auth/setemail", put(|| reply(message("Email updated"))))
}

fn course_routes() -> Router {
    let updated = || reply(message("Course updated successfully"));
    Router::new()
        .route("/courses/student", get(|| reply(student_courses())))
        .route("/courses/academic", get(|| reply(academic_courses())))
        .route("/courses/url", put(updated))
        .route("/courses/pdf", put(updated))
        .route("/courses/:code", get(course))
        // a lone trailing segment is a version
        .route("/courses/:code/:year", get(course))
        .route("/courses/:code/:year/:term", get(course).put(updated))
        .route("/courses/:code/:year/:term/:version", get(course))
}

fn project_routes() -> Router {
    Router::new()
        .route("/projects/student", get(|| reply(project_list())))
        .route("/projects/academic", get(|| reply(project_list())))
        .route(
            "/projects",
            post(|| reply(message("Project updated successfully"))),
        )
        .route("/projects/:id", get(project))
        .route(
            "/projects/join/:project/:group",
            put(|| reply(message("User joined group"))),
        )
        .route(
            "/projects/groupCreate/:project",
            post(|| reply(message("Created group"))),
        )
        .route("/student/projects", get(|| reply(project_list())))
}

fn profile_routes() -> Router {
    let mut router = Router::new()
        .route("/user/profile", get(|| reply(profile())))
        .route(
            "/user/profile/edit-intro",
            put(|| reply(message("Profile updated"))),
        )
        .route(
            "/user/profile/setaccountpreference",
            put(|| reply(message("Account preference updated"))),
        )
        .route(
            "/profile/edit/privacy",
            put(|| reply(message("Privacy updated"))),
        )
        .route("/user/recommended-users", get(|| reply(recommended_users())));

    // role-prefixed routes are spelled out per role
    for user_type in UserType::ALL {
        let role = segment(user_type.as_str());
        router = router
            .route(&format!("/user/profile/{}", role), get(|| reply(profile())))
            .route(
                &format!("/user/profile/{}/transcript", role),
                post(|| reply(message("Transcript uploaded"))),
            )
            .route(&format!("/{}/course", role), get(|| reply(profile_courses())))
            .route(
                &format!("/{}/course/add", role),
                post(|| reply(message("Course added"))),
            )
            .route(
                &format!("/{}/profile/skills", role),
                get(|| reply(profile_skills())),
            );
        // DELETE /admin/course/delete belongs to admin_routes
        if user_type != UserType::Admin {
            router = router.route(
                &format!("/{}/course/delete", role),
                delete(|| reply(message("Course deleted"))),
            );
        }
    }
    router
}

fn admin_routes() -> Router {
    Router::new()
        .route("/admin/dashboard", get(|| reply(dashboard())))
        .route("/admin/all-users", get(|| reply(all_users())))
        .route("/admin/all-courses", get(|| reply(all_courses())))
        .route("/admin/all-projects", get(|| reply(all_projects())))
        .route("/admin/user/delete", delete(|| reply(message("User deleted"))))
        .route(
            "/admin/course/delete",
            delete(|| reply(message("Course deleted"))),
        )
        .route(
            "/admin/project/delete",
            delete(|| reply(message("Project deleted"))),
        )
        .route(
            "/admin/user/edit/usertype",
            put(|| reply(message("User type updated"))),
        )
        .route(
            "/admin/auth/passwordreset",
            put(|| reply(message("Password reset"))),
        )
}

async fn reply(body: Value) -> Json<Value> {
    Json(body)
}

async fn course() -> Json<Value> {
    Json(course_detail())
}

async fn project(Path(id): Path<String>) -> Response {
    match id.parse::<i64>() {
        Ok(id) => Json(project_detail(id)).into_response(),
        Err(_) => error_response(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn record_request(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    let recorded = RecordedRequest {
        id: Uuid::new_v4(),
        method: parts.method.to_string(),
        path,
        authorization: parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
        received_at: Utc::now(),
    };
    tracing::debug!(method = %recorded.method, path = %recorded.path, "mock request");
    state.record(recorded);

    if state.is_failing() {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MOCK_ERROR);
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// A mock backend running on a background task
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &MockState {
        &self.state
    }

    /// Stop accepting connections and wait for the server task
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!("mock server task failed: {}", e);
        }
    }
}

/// Bind `addr` and serve the mock in the background
pub async fn spawn_mock(state: MockState, addr: SocketAddr) -> std::io::Result<MockServer> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let shutdown = CancellationToken::new();

    let app = router(state.clone());
    let token = shutdown.clone();
    let handle = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await;
        if let Err(e) = result {
            tracing::error!("mock server stopped: {}", e);
        }
    });

    tracing::info!("mock backend listening on http://{}", addr);
    Ok(MockServer {
        addr,
        state,
        shutdown,
        handle,
    })
}
