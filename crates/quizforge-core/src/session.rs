//! Timed quiz session state machine.
//!
//! A session starts `Active` and ends in exactly one of two terminal states:
//! `Completed` when the last unanswered question receives a valid answer, or
//! `Expired` when a [`Session::check_expiry`] poll sees that the deadline
//! timer has fired. The session never blocks on the timer. Callers poll
//! `check_expiry` at every question boundary; a read that is already in
//! progress when the deadline passes may still complete, and its answer is
//! rejected once the poll has moved the session to `Expired`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Question, QuestionSet};
use crate::scoring::{self, AnswerRecord, ScoreResult};
use crate::shuffle::PresentationOrder;
use crate::timer::{Timer, TimerSignal};
use crate::validator::{AnswerValidator, OptionValidator};

/// Lifecycle state of a session. Transitions only go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Expired,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Active)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Expired => write!(f, "expired"),
        }
    }
}

/// The question a session is waiting on.
#[derive(Debug, Clone, Copy)]
pub struct CurrentQuestion<'a> {
    /// Stable index into the question set; pass it back to `submit_answer`.
    pub index: usize,
    /// 1-based position in the presentation order.
    pub position: usize,
    /// Number of questions in the session.
    pub total: usize,
    pub question: &'a Question,
}

/// One quiz attempt in progress.
pub struct Session {
    id: Uuid,
    questions: Arc<QuestionSet>,
    order: PresentationOrder,
    answers: AnswerRecord,
    validator: Box<dyn AnswerValidator>,
    status: SessionStatus,
    deadline: Duration,
    timer: Timer,
    started: Instant,
    started_at: DateTime<Utc>,
    ended: Option<Instant>,
}

impl Session {
    /// Start a session over `questions`, presented in `order`, that expires
    /// after `deadline`.
    ///
    /// Must be called from within a tokio runtime (the deadline timer runs as
    /// a task).
    pub fn start(
        questions: Arc<QuestionSet>,
        order: PresentationOrder,
        deadline: Duration,
    ) -> Result<Self, QuizError> {
        if order.len() != questions.len() {
            return Err(QuizError::Validation(format!(
                "presentation order covers {} questions but the set has {}",
                order.len(),
                questions.len()
            )));
        }

        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            questions = questions.len(),
            deadline_secs = deadline.as_secs(),
            "session started"
        );

        Ok(Self {
            id,
            questions,
            order,
            answers: AnswerRecord::new(),
            validator: Box::new(OptionValidator),
            status: SessionStatus::Active,
            deadline,
            timer: Timer::start(deadline),
            started: Instant::now(),
            started_at: Utc::now(),
            ended: None,
        })
    }

    /// Replace the default [`OptionValidator`].
    pub fn with_validator(mut self, validator: impl AnswerValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn questions(&self) -> &Arc<QuestionSet> {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time left before the deadline; zero once the session has ended.
    pub fn remaining(&self) -> Duration {
        match self.status {
            SessionStatus::Active => self.deadline.saturating_sub(self.started.elapsed()),
            _ => Duration::ZERO,
        }
    }

    /// Observer for the deadline timer, for callers that want to await expiry.
    pub fn timer_signal(&self) -> TimerSignal {
        self.timer.signal()
    }

    /// The next unanswered question in presentation order.
    ///
    /// `None` once every question is answered or the session has ended.
    pub fn current_question(&self) -> Option<CurrentQuestion<'_>> {
        if self.status != SessionStatus::Active {
            return None;
        }
        self.order
            .iter()
            .enumerate()
            .find(|(_, index)| !self.answers.contains(*index))
            .map(|(pos, index)| CurrentQuestion {
                index,
                position: pos + 1,
                total: self.order.len(),
                question: &self.questions[index],
            })
    }

    /// Record an answer for the question at `index`, replacing any earlier
    /// answer to it.
    ///
    /// The stored value is the option the answer resolves to (so `"b"` is
    /// stored as the second option's text). Completes the session when this
    /// was the last unanswered question.
    pub fn submit_answer(&mut self, index: usize, answer: &str) -> Result<SessionStatus, QuizError> {
        if self.status != SessionStatus::Active {
            return Err(QuizError::InvalidState {
                operation: "submit an answer",
                status: self.status,
            });
        }

        let question = self
            .questions
            .get(index)
            .ok_or(QuizError::UnknownQuestion {
                index,
                total: self.questions.len(),
            })?;

        if !self.validator.is_recognized_option(question, answer) {
            return Err(QuizError::InvalidAnswer {
                index,
                answer: answer.to_string(),
            });
        }

        let resolved = question.resolve_answer(answer).unwrap_or(answer.trim());
        if let Some(previous) = self.answers.record(index, resolved) {
            tracing::debug!(session = %self.id, index, %previous, "answer replaced");
        } else {
            tracing::debug!(session = %self.id, index, "answer recorded");
        }

        if self.answers.len() == self.order.len() {
            self.timer.cancel();
            self.finish(SessionStatus::Completed);
        }

        Ok(self.status)
    }

    /// Poll the deadline timer, moving an active session to `Expired` if it
    /// has fired. Returns whether the session is expired.
    pub fn check_expiry(&mut self) -> bool {
        if self.status == SessionStatus::Active && self.timer.is_fired() {
            self.finish(SessionStatus::Expired);
        }
        self.status == SessionStatus::Expired
    }

    /// Score the session. Only valid once it has completed or expired;
    /// repeated calls return the same result.
    pub fn finalize(&self) -> Result<ScoreResult, QuizError> {
        let Some(ended) = self.ended else {
            return Err(QuizError::InvalidState {
                operation: "finalize",
                status: self.status,
            });
        };

        let elapsed = match self.status {
            SessionStatus::Expired => self.deadline,
            _ => ended.duration_since(self.started),
        };

        Ok(ScoreResult {
            correct: scoring::score(&self.questions, &self.answers),
            total: self.questions.len(),
            answered: self.answers.len(),
            elapsed,
        })
    }

    fn finish(&mut self, status: SessionStatus) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.ended = Some(Instant::now());
        tracing::info!(
            session = %self.id,
            %status,
            answered = self.answers.len(),
            total = self.questions.len(),
            "session ended"
        );
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("answered", &self.answers.len())
            .field("total", &self.questions.len())
            .field("deadline", &self.deadline)
            .finish()
    }
}
