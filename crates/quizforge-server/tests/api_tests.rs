//! HTTP API tests driven through the router with `tower::ServiceExt`.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use quizforge_core::{Question, QuestionSet};
use quizforge_server::{router, AppState, SessionSettings};

fn state(time_limit: Duration) -> AppState {
    let questions = QuestionSet::load(vec![
        Question::new("2+2?", ["3", "4", "5"], "4"),
        Question::new("Capital of France?", ["Paris", "Lyon"], "Paris"),
    ])
    .expect("valid question set");
    AppState::new(
        questions,
        SessionSettings {
            time_limit,
            shuffle: false,
            seed: None,
        },
    )
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(req.body(body).expect("request build should succeed"))
        .await
        .expect("router should respond");

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn routes_reject_requests_before_start() {
    let app = router(state(Duration::from_secs(300)));

    for uri in ["/question", "/score", "/status"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "expected NOT_FOUND for {uri}");
        assert!(body["error"].as_str().unwrap().contains("no session"));
    }
}

#[tokio::test]
async fn full_quiz_scores_every_answer() {
    let app = router(state(Duration::from_secs(300)));

    let (status, start) = send(&app, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(start["status"], "active");
    assert_eq!(start["total"], 2);
    assert_eq!(start["deadlineSecs"], 300);
    assert_eq!(start["question"]["questionIndex"], 0);
    assert_eq!(start["question"]["text"], "2+2?");
    assert_eq!(start["question"]["options"], json!(["3", "4", "5"]));

    let (status, next) = send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": 0, "answer": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(next["answered"], 1);
    assert_eq!(next["question"]["text"], "Capital of France?");

    // The original client sent the index as a string.
    let (status, done) = send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": "1", "answer": "a" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");

    let (status, score) = send(&app, Method::GET, "/score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["correct"], 2);
    assert_eq!(score["total"], 2);
    assert_eq!(score["status"], "completed");
    assert_eq!(score["sessionId"], start["sessionId"]);
}

#[tokio::test]
async fn invalid_answer_is_a_bad_request_and_not_recorded() {
    let app = router(state(Duration::from_secs(300)));
    send(&app, Method::POST, "/start", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": 0, "answer": "Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not a valid option"));

    let (_, status_body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status_body["answered"], 0);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = router(state(Duration::from_secs(300)));
    send(&app, Method::POST, "/start", None).await;

    let (status, body) = send(&app, Method::POST, "/answer", Some(json!({ "answer": "4" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": 9, "answer": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn score_while_active_conflicts() {
    let app = router(state(Duration::from_secs(300)));
    send(&app, Method::POST, "/start", None).await;

    let (status, _) = send(&app, Method::GET, "/score", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn answer_after_completion_conflicts() {
    let app = router(state(Duration::from_secs(300)));
    send(&app, Method::POST, "/start", None).await;
    for (i, answer) in [(0, "4"), (1, "Paris")] {
        send(
            &app,
            Method::POST,
            "/answer",
            Some(json!({ "questionIndex": i, "answer": answer })),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": 0, "answer": "3" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("completed"));
}

#[tokio::test(start_paused = true)]
async fn deadline_expires_session_in_background() {
    let app = router(state(Duration::from_secs(60)));
    send(&app, Method::POST, "/start", None).await;
    send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": 0, "answer": "3" })),
    )
    .await;

    tokio::time::sleep(Duration::from_secs(61)).await;

    let (_, status_body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status_body["status"], "expired");
    assert_eq!(status_body["remainingMs"], 0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/answer",
        Some(json!({ "questionIndex": 1, "answer": "Paris" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, score) = send(&app, Method::GET, "/score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["correct"], 0);
    assert_eq!(score["total"], 2);
    assert_eq!(score["status"], "expired");
    assert_eq!(score["elapsedMs"], 60_000);
}

#[tokio::test(start_paused = true)]
async fn finished_session_can_be_restarted() {
    let app = router(state(Duration::from_secs(5)));
    let (_, first) = send(&app, Method::POST, "/start", None).await;

    tokio::time::sleep(Duration::from_secs(6)).await;

    let (status, second) = send(&app, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(first["sessionId"], second["sessionId"]);
    assert_eq!(second["status"], "active");
}
