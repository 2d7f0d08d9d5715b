//! HTTP contract tests against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use coursedir_server::auth::{Credentials, HashingConfig, PasswordHasher};
use coursedir_server::{build_router, seed::seed, AppState, ServerConfig};

const JOE: (&str, &str) = ("joe@smith.com", "joepassword");
const SALLY: (&str, &str) = ("sally@jones.com", "sallypassword");

struct TestApp {
    router: Router,
    state: Arc<AppState>,
}

impl TestApp {
    async fn seeded() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let hasher = PasswordHasher::new(HashingConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let state = Arc::new(AppState::in_memory(hasher));
        assert!(seed(&state).await.unwrap());

        Self {
            router: build_router(state.clone(), &ServerConfig::default()),
            state,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Option<(&str, &str)>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some((email, password)) = auth {
            let creds = Credentials {
                email: email.into(),
                password: password.into(),
            };
            builder = builder.header(header::AUTHORIZATION, creds.to_header_value());
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn course_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A course about things.",
        "estimatedTime": "2 hours",
        "materialsNeeded": "* Patience"
    })
}

#[tokio::test]
async fn welcome_and_health() {
    let app = TestApp::seeded().await;

    let response = app.send(Method::GET, "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "Welcome to the REST API project!"
    );

    let response = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn create_user_returns_location_and_can_log_in() {
    let app = TestApp::seeded().await;

    let response = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "emailAddress": "Ada@Example.com",
                "password": "analytical"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = app
        .send(
            Method::GET,
            "/api/users",
            Some(("ada@example.com", "analytical")),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["emailAddress"], "ada@example.com");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn create_user_stores_hashed_password() {
    let app = TestApp::seeded().await;

    let joe = app
        .state
        .users
        .authenticate(Credentials {
            email: JOE.0.into(),
            password: JOE.1.into(),
        })
        .await
        .unwrap();

    assert!(joe.password_hash.starts_with("$argon2id$"));
    assert!(!joe.password_hash.contains(JOE.1));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::seeded().await;

    let response = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({
                "firstName": "Joe",
                "lastName": "Again",
                "emailAddress": "JOE@smith.com",
                "password": "anotherpassword"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Email address is already in use by another user."
    );
}

#[tokio::test]
async fn create_user_aggregates_validation_errors() {
    let app = TestApp::seeded().await;

    let response = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "lastName": "", "emailAddress": "nope", "password": "short" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(fields, ["firstName", "lastName", "emailAddress", "password"]);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = TestApp::seeded().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "bad_request");
}

#[tokio::test]
async fn protected_routes_require_credentials() {
    let app = TestApp::seeded().await;

    let cases = [
        (Method::GET, "/api/users", None),
        (Method::POST, "/api/courses", Some(course_body("New"))),
        (Method::PUT, "/api/courses/1", Some(course_body("New"))),
        (Method::DELETE, "/api/courses/1", None),
    ];

    for (method, uri, body) in cases {
        let response = app.send(method.clone(), uri, None, body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"coursedir\""
        );
    }
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_401() {
    let app = TestApp::seeded().await;

    let wrong = app
        .send(Method::GET, "/api/users", Some((JOE.0, "notjoespassword")), None)
        .await;
    let unknown = app
        .send(Method::GET, "/api/users", Some(("ghost@nowhere.com", "whatever1")), None)
        .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong).await, json_body(unknown).await);
}

#[tokio::test]
async fn list_and_get_courses_include_creator() {
    let app = TestApp::seeded().await;

    let response = app.send(Method::GET, "/api/courses", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let courses = json_body(response).await;
    let courses = courses.as_array().unwrap();
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0]["title"], "Build a Basic Bookcase");
    assert_eq!(courses[0]["creator"]["emailAddress"], JOE.0);
    assert!(courses[0]["creator"].get("password").is_none());

    let response = app.send(Method::GET, "/api/courses/3", None, None).await;
    let course = json_body(response).await;
    assert_eq!(course["title"], "Learn How to Test Programs");
    assert_eq!(course["estimatedTime"], Value::Null);
    assert_eq!(course["creator"]["firstName"], "Sally");
}

#[tokio::test]
async fn get_course_bad_or_missing_id() {
    let app = TestApp::seeded().await;

    let response = app.send(Method::GET, "/api/courses/abc", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send(Method::GET, "/api/courses/0", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send(Method::GET, "/api/courses/999", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_course_returns_location() {
    let app = TestApp::seeded().await;

    let response = app
        .send(Method::POST, "/api/courses", Some(JOE), Some(course_body("Woodturning")))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/courses/4");

    let course = json_body(app.send(Method::GET, "/api/courses/4", None, None).await).await;
    assert_eq!(course["title"], "Woodturning");
    assert_eq!(course["materialsNeeded"], "* Patience");
    assert_eq!(course["creator"]["emailAddress"], JOE.0);
}

#[tokio::test]
async fn create_course_validates_body() {
    let app = TestApp::seeded().await;

    let response = app
        .send(Method::POST, "/api/courses", Some(JOE), Some(json!({ "title": " " })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "title");
    assert_eq!(body["errors"][1]["field"], "description");
}

#[tokio::test]
async fn owner_can_update_course() {
    let app = TestApp::seeded().await;

    let response = app
        .send(Method::PUT, "/api/courses/1", Some(JOE), Some(course_body("Bigger Bookcase")))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let course = json_body(app.send(Method::GET, "/api/courses/1", None, None).await).await;
    assert_eq!(course["title"], "Bigger Bookcase");
    assert_eq!(course["estimatedTime"], "2 hours");
}

#[tokio::test]
async fn non_owner_mutations_are_403() {
    let app = TestApp::seeded().await;

    let response = app
        .send(Method::PUT, "/api/courses/1", Some(SALLY), Some(course_body("Mine now")))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        json_body(response).await["message"],
        "Only the owner of a course may modify it."
    );

    let response = app
        .send(Method::DELETE, "/api/courses/1", Some(SALLY), None)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let course = json_body(app.send(Method::GET, "/api/courses/1", None, None).await).await;
    assert_eq!(course["title"], "Build a Basic Bookcase");
}

#[tokio::test]
async fn ownership_checked_before_body() {
    let app = TestApp::seeded().await;

    // Invalid body, but Sally doesn't own course 1
    let response = app
        .send(Method::PUT, "/api/courses/1", Some(SALLY), Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing course wins over ownership and body
    let response = app
        .send(Method::PUT, "/api/courses/999", Some(SALLY), Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Owner gets the validation error
    let response = app
        .send(Method::PUT, "/api/courses/1", Some(JOE), Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_course_then_get_is_404() {
    let app = TestApp::seeded().await;

    let response = app
        .send(Method::DELETE, "/api/courses/2", Some(SALLY), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.send(Method::GET, "/api/courses/2", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(Method::DELETE, "/api/courses/2", Some(SALLY), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = TestApp::seeded().await;

    let response = app.send(Method::GET, "/api/nothing", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["message"], "Route Not Found");
}
