//! Core data model types for quizforge.
//!
//! A [`QuestionSet`] is validated once at load time and is read-only from
//! then on; sessions share it through an `Arc`.

use std::collections::HashSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Options are lettered `A`, `B`, ... so a question can have at most 26.
pub const MAX_OPTIONS: usize = 26;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question prompt.
    pub text: String,
    /// The choices, in display order.
    pub options: Vec<String>,
    /// The correct choice; matches one of `options` ignoring case.
    pub correct_answer: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Whether `answer` is the correct choice (case-insensitive).
    pub fn is_correct(&self, answer: &str) -> bool {
        eq_ignore_case(answer.trim(), self.correct_answer.trim())
    }

    /// Map an answer to the option it selects.
    ///
    /// An option's own text wins over letter interpretation, so a question
    /// whose options are themselves letters still resolves by text.
    pub fn resolve_answer(&self, answer: &str) -> Option<&str> {
        let answer = answer.trim();
        if let Some(option) = self.options.iter().find(|o| eq_ignore_case(o.trim(), answer)) {
            return Some(option.as_str());
        }
        letter_index(answer)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// The options paired with their display letters.
    pub fn lettered_options(&self) -> impl Iterator<Item = (char, &str)> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, o)| (option_letter(i), o.as_str()))
    }

    fn validate(&self, position: usize) -> Result<(), QuizError> {
        let invalid = |msg: String| Err(QuizError::Validation(format!("question {position}: {msg}")));

        if self.text.trim().is_empty() {
            return invalid("text is empty".into());
        }
        if self.options.len() < 2 {
            return invalid(format!(
                "needs at least 2 options, found {}",
                self.options.len()
            ));
        }
        if self.options.len() > MAX_OPTIONS {
            return invalid(format!(
                "has {} options, at most {MAX_OPTIONS} are supported",
                self.options.len()
            ));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.trim().to_lowercase()) {
                return invalid(format!("duplicate option '{option}'"));
            }
        }

        if !self.options.iter().any(|o| self.is_correct(o)) {
            return invalid(format!(
                "correct answer '{}' is not one of the options",
                self.correct_answer
            ));
        }

        Ok(())
    }
}

/// The display letter for the option at `index` (`0` → `A`).
pub fn option_letter(index: usize) -> char {
    debug_assert!(index < MAX_OPTIONS);
    (b'A' + index as u8) as char
}

/// The option index a single letter refers to, if it is one.
pub fn letter_index(answer: &str) -> Option<usize> {
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => None,
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A validated, non-empty, read-only collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate and take ownership of `questions`.
    pub fn load(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Validation("no questions provided".into()));
        }
        for (i, question) in questions.iter().enumerate() {
            question.validate(i + 1)?;
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl Index<usize> for QuestionSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
