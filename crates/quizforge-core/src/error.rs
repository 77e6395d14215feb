//! Quiz error types.
//!
//! These errors are raised by the core types themselves. None of them come
//! from I/O: loading files and parsing config report through `anyhow` instead,
//! and only hand the core data that is already structurally complete.

use thiserror::Error;

use crate::session::SessionStatus;

/// Errors produced by question sets and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The question set (or a presentation order over it) is malformed.
    #[error("invalid question set: {0}")]
    Validation(String),

    /// The submitted answer is not one of the question's options.
    #[error("'{answer}' is not a valid option for question {index}")]
    InvalidAnswer { index: usize, answer: String },

    /// The operation is not allowed in the session's current state.
    #[error("cannot {operation} while the session is {status}")]
    InvalidState {
        operation: &'static str,
        status: SessionStatus,
    },

    /// The question index is outside the question set.
    #[error("no question with index {index} (set has {total})")]
    UnknownQuestion { index: usize, total: usize },
}

impl QuizError {
    /// Returns `true` if the caller can recover by asking the taker again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuizError::InvalidAnswer { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invalid_answer_is_recoverable() {
        let bad_answer = QuizError::InvalidAnswer {
            index: 0,
            answer: "Z".into(),
        };
        assert!(bad_answer.is_recoverable());

        let bad_state = QuizError::InvalidState {
            operation: "submit an answer",
            status: SessionStatus::Completed,
        };
        assert!(!bad_state.is_recoverable());
        assert_eq!(
            bad_state.to_string(),
            "cannot submit an answer while the session is completed"
        );
    }
}
