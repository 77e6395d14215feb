//! quizforge-core: Question sets, timed quiz sessions, and scoring.
//!
//! This crate owns the quiz state machine that both the CLI and the HTTP
//! server drive: a validated [`QuestionSet`](model::QuestionSet), a shuffled
//! presentation order, a cancellable deadline timer, and the
//! [`Session`](session::Session) that ties them together.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod timer;
pub mod validator;

pub use error::QuizError;
pub use model::{Question, QuestionSet};
pub use scoring::{AnswerRecord, ScoreResult};
pub use session::{CurrentQuestion, Session, SessionStatus};
pub use shuffle::PresentationOrder;
