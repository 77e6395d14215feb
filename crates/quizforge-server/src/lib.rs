//! quizforge-server: HTTP API over a single in-memory quiz session.
//!
//! The server holds one session slot. `POST /start` fills it, the other
//! routes drive or inspect it, and a background task per session moves it to
//! `Expired` as soon as its deadline timer fires.

pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Mutex;

use quizforge_core::config::QuizConfig;
use quizforge_core::{QuestionSet, Session};

/// How new sessions are set up.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub time_limit: Duration,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl From<&QuizConfig> for SessionSettings {
    fn from(config: &QuizConfig) -> Self {
        Self {
            time_limit: config.time_limit(),
            shuffle: config.shuffle,
            seed: config.seed,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionSet>,
    pub settings: SessionSettings,
    pub session: Arc<Mutex<Option<Session>>>,
}

impl AppState {
    pub fn new(questions: QuestionSet, settings: SessionSettings) -> Self {
        Self {
            questions: Arc::new(questions),
            settings,
            session: Arc::new(Mutex::new(None)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/start", post(handlers::start))
        .route("/question", get(handlers::question))
        .route("/answer", post(handlers::answer))
        .route("/score", get(handlers::score))
        .route("/status", get(handlers::status))
        .with_state(state)
}

/// Bind `address` and serve the API until the process is stopped.
pub async fn serve(state: AppState, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(
        "serving {} questions on http://{}",
        state.questions.len(),
        listener.local_addr()?
    );
    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
