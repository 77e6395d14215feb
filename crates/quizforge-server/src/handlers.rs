//! Route handlers and their JSON shapes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizforge_core::shuffle::presentation_order;
use quizforge_core::timer::TimerState;
use quizforge_core::{CurrentQuestion, QuizError, Session, SessionStatus};

use crate::error::ApiError;
use crate::AppState;

/// A question as shown to the taker. Options are answered by letter or text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_index: usize,
    pub position: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<String>,
}

impl From<CurrentQuestion<'_>> for QuestionView {
    fn from(current: CurrentQuestion<'_>) -> Self {
        Self {
            question_index: current.index,
            position: current.position,
            total: current.total,
            text: current.question.text.clone(),
            options: current.question.options.clone(),
        }
    }
}

/// Where the session stands: the next question, or a terminal marker.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Progress {
    Active { question: QuestionView },
    Completed,
    Expired,
}

impl Progress {
    fn of(session: &Session) -> Self {
        match (session.status(), session.current_question()) {
            (SessionStatus::Active, Some(current)) => Progress::Active {
                question: current.into(),
            },
            (SessionStatus::Expired, _) => Progress::Expired,
            _ => Progress::Completed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub deadline_secs: u64,
    pub total: usize,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Body of `POST /answer`. `questionIndex` may be a number or a numeric
/// string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    #[serde(deserialize_with = "deserialize_index")]
    pub question_index: usize,
    pub answer: String,
}

fn deserialize_index<'de, D: serde::Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = usize;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a non-negative number or numeric string")
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<usize, E> {
            usize::try_from(v).map_err(E::custom)
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<usize, E> {
            usize::try_from(v).map_err(E::custom)
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<usize, E> {
            v.trim().parse().map_err(E::custom)
        }
    }
    d.deserialize_any(Vis)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub answered: usize,
    pub total: usize,
    #[serde(flatten)]
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub correct: usize,
    pub total: usize,
    pub answered: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub answered: usize,
    pub total: usize,
    pub remaining_ms: u64,
}

/// `POST /start`: begin a new session, replacing a finished one.
pub async fn start(State(state): State<AppState>) -> Result<Json<StartResponse>, ApiError> {
    let mut slot = state.session.lock().await;
    if let Some(existing) = slot.as_mut() {
        if !existing.check_expiry() && existing.status() == SessionStatus::Active {
            return Err(QuizError::InvalidState {
                operation: "start a new session",
                status: SessionStatus::Active,
            }
            .into());
        }
    }

    let settings = &state.settings;
    let order = presentation_order(state.questions.len(), settings.shuffle, settings.seed);
    let session = Session::start(state.questions.clone(), order, settings.time_limit)?;
    spawn_expiry_watch(&state, &session);

    let response = StartResponse {
        session_id: session.id(),
        started_at: session.started_at(),
        deadline_secs: session.deadline().as_secs(),
        total: session.total(),
        progress: Progress::of(&session),
    };
    *slot = Some(session);
    Ok(Json(response))
}

/// `GET /question`: the question the session is waiting on.
pub async fn question(State(state): State<AppState>) -> Result<Json<Progress>, ApiError> {
    let mut slot = state.session.lock().await;
    let session = slot.as_mut().ok_or(ApiError::NoSession)?;
    session.check_expiry();
    Ok(Json(Progress::of(session)))
}

/// `POST /answer`: record an answer and return what comes next.
pub async fn answer(
    State(state): State<AppState>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let Json(request) = body?;
    let mut slot = state.session.lock().await;
    let session = slot.as_mut().ok_or(ApiError::NoSession)?;

    session.check_expiry();
    session.submit_answer(request.question_index, &request.answer)?;

    Ok(Json(AnswerResponse {
        answered: session.answered(),
        total: session.total(),
        progress: Progress::of(session),
    }))
}

/// `GET /score`: final result of a completed or expired session.
pub async fn score(State(state): State<AppState>) -> Result<Json<ScoreResponse>, ApiError> {
    let mut slot = state.session.lock().await;
    let session = slot.as_mut().ok_or(ApiError::NoSession)?;
    session.check_expiry();
    let result = session.finalize()?;

    Ok(Json(ScoreResponse {
        session_id: session.id(),
        status: session.status(),
        correct: result.correct,
        total: result.total,
        answered: result.answered,
        elapsed_ms: result.elapsed.as_millis() as u64,
    }))
}

/// `GET /status`: progress summary without the question body.
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let mut slot = state.session.lock().await;
    let session = slot.as_mut().ok_or(ApiError::NoSession)?;
    session.check_expiry();

    Ok(Json(StatusResponse {
        session_id: session.id(),
        status: session.status(),
        answered: session.answered(),
        total: session.total(),
        remaining_ms: session.remaining().as_millis() as u64,
    }))
}

/// Expire the session as soon as its timer fires, so pollers see `expired`
/// without having to make a request first. Exits quietly if the timer is
/// cancelled because the session completed.
fn spawn_expiry_watch(state: &AppState, session: &Session) {
    let signal = session.timer_signal();
    let id = session.id();
    let slot = state.session.clone();

    tokio::spawn(async move {
        if signal.settled().await != TimerState::Fired {
            return;
        }
        let mut guard = slot.lock().await;
        if let Some(session) = guard.as_mut().filter(|s| s.id() == id) {
            if session.check_expiry() {
                tracing::info!(session = %id, "time limit reached");
            }
        }
    });
}
