#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use showcase_core::github::{GithubRepo, GithubSession, GithubUser};
use showcase_core::member::{normalize_email, Member, MembershipQuery};
use showcase_db::{KeyValueStore, MemoryStore};
use showcase_remote::github::{GithubApi, GithubError, GithubSettings};
use showcase_remote::membership::{LookupError, MembershipLookup, MembershipSettings};
use tokio::sync::Notify;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use showcase_api::config::{ServerConfig, DEFAULT_MAX_IMAGE_BYTES};
use showcase_api::routes;
use showcase_api::state::AppState;

pub const GOOD_CODE: &str = "good-code";
pub const GITHUB_TOKEN: &str = "gho_token";

/// Build a test `ServerConfig` with safe defaults.
///
/// Remote URLs point nowhere; tests swap in fakes for both clients.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        store_path: "unused.json".into(),
        max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        membership: MembershipSettings {
            base_url: None,
            api_key: String::new(),
            table: "members".into(),
            timeout: Duration::from_secs(1),
        },
        github: GithubSettings {
            api_url: "http://127.0.0.1:1".into(),
            oauth_proxy_url: "http://127.0.0.1:1".into(),
            timeout: Duration::from_secs(1),
        },
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory member table keyed by email and by phone.
#[derive(Default)]
pub struct FakeMembership {
    members: Mutex<HashMap<String, Member>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    pause: Mutex<Option<Arc<Notify>>>,
}

impl FakeMembership {
    /// Register a paid member reachable by email and, if given, phone.
    pub fn with_member(self, email: &str, full_name: &str, phone: Option<&str>) -> Self {
        let member = Member::new(email, full_name, phone);
        {
            let mut members = self.members.lock().unwrap();
            if let Some(p) = &member.phone {
                members.insert(p.clone(), member.clone());
            }
            members.insert(member.email.clone(), member);
        }
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make lookups wait until the returned handle is notified.
    pub fn pause(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.pause.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }
}

#[async_trait]
impl MembershipLookup for FakeMembership {
    async fn find_member(&self, query: &MembershipQuery) -> Result<Option<Member>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let pause = self.pause.lock().unwrap().clone();
        if let Some(notify) = pause {
            notify.notified().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::ApiError {
                status: 503,
                body: "unavailable".into(),
            });
        }
        let members = self.members.lock().unwrap();
        let found = query
            .email
            .as_ref()
            .and_then(|e| members.get(&normalize_email(e)))
            .or_else(|| query.phone.as_ref().and_then(|p| members.get(p)))
            .cloned();
        Ok(found)
    }
}

/// GitHub stand-in accepting [`GOOD_CODE`] and [`GITHUB_TOKEN`].
#[derive(Default)]
pub struct FakeGithub {
    repos: Vec<GithubRepo>,
    failing: AtomicBool,
}

impl FakeGithub {
    pub fn with_repos(repos: Vec<GithubRepo>) -> Self {
        Self {
            repos,
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl GithubApi for FakeGithub {
    async fn exchange_code(&self, code: &str) -> Result<GithubSession, GithubError> {
        if code != GOOD_CODE {
            return Err(GithubError::Rejected("bad_verification_code".into()));
        }
        Ok(GithubSession {
            user: GithubUser {
                login: "octo".into(),
                name: Some("Octo Cat".into()),
                avatar_url: None,
            },
            access_token: GITHUB_TOKEN.into(),
        })
    }

    async fn list_repositories(&self, access_token: &str) -> Result<Vec<GithubRepo>, GithubError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GithubError::ApiError {
                status: 502,
                body: "bad gateway".into(),
            });
        }
        if access_token != GITHUB_TOKEN {
            return Err(GithubError::ApiError {
                status: 401,
                body: "Bad credentials".into(),
            });
        }
        Ok(self.repos.clone())
    }
}

pub fn repo(id: i64, name: &str, stars: u32, fork: bool) -> GithubRepo {
    GithubRepo {
        id,
        name: name.into(),
        html_url: format!("https://github.com/octo/{name}"),
        description: Some(format!("{name} description")),
        language: Some("Rust".into()),
        fork,
        stargazers_count: stars,
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub async fn build_test_app(
    store: Arc<dyn KeyValueStore>,
    membership: Arc<FakeMembership>,
    github: Arc<FakeGithub>,
) -> Router {
    let state = AppState::load(store, test_config(), membership, github)
        .await
        .unwrap();

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
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
        .layer(cors)
        .with_state(state)
}

/// An app over a fresh in-memory store, with member `a@x.com` ("A") registered.
pub async fn default_app() -> (Router, Arc<FakeMembership>) {
    let membership = Arc::new(FakeMembership::default().with_member("a@x.com", "A", Some("0500")));
    let app = build_test_app(
        Arc::new(MemoryStore::new()),
        Arc::clone(&membership),
        Arc::new(FakeGithub::default()),
    )
    .await;
    (app, membership)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Request::post(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::put(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

const BOUNDARY: &str = "showcase-test-boundary";

/// Encode text parts and an optional `projectImage` file part.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"projectImage\"; \
                 filename=\"shot.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<&[u8]>,
) -> Response {
    let request = Request::post(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, image)))
        .unwrap();
    send(app, request).await
}

/// Form fields for a complete submission.
pub fn project_fields<'a>(name: &'a str, creator: &'a str, link: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("projectName", name),
        ("creatorName", creator),
        ("projectLink", link),
        ("projectDescription", "d"),
    ]
}

pub async fn submit(app: Router, fields: &[(&str, &str)]) -> Response {
    post_multipart(app, "/api/v1/form/submit", fields, None).await
}

pub async fn verify_email(app: Router, email: &str) -> Response {
    post_json(
        app,
        "/api/v1/membership/verify",
        serde_json::json!({ "email": email }),
    )
    .await
}

/// Smallest byte string the image sniffer recognizes as PNG.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
