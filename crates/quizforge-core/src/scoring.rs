//! Answer records and scoring.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::QuestionSet;

/// Submitted answers keyed by stable question index.
///
/// Entries are only ever inserted or overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(BTreeMap<usize, String>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the one it replaced.
    pub fn record(&mut self, index: usize, answer: impl Into<String>) -> Option<String> {
        self.0.insert(index, answer.into())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(&i, a)| (i, a.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for AnswerRecord {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(i, a)| (i, a.into())).collect())
    }
}

/// Number of questions answered correctly.
///
/// Unanswered questions count as wrong, and answers keyed by indices outside
/// the set are ignored, so the result never exceeds `questions.len()`.
pub fn score(questions: &QuestionSet, answers: &AnswerRecord) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(*i).is_some_and(|a| q.is_correct(a)))
        .count()
}

/// How one question fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub text: String,
    pub given: Option<String>,
    pub correct_answer: String,
    pub correct: bool,
}

/// Per-question outcomes, in question set order.
pub fn breakdown(questions: &QuestionSet, answers: &AnswerRecord) -> Vec<QuestionOutcome> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let given = answers.get(i).map(str::to_owned);
            QuestionOutcome {
                index: i,
                text: q.text.clone(),
                correct: given.as_deref().is_some_and(|a| q.is_correct(a)),
                given,
                correct_answer: q.correct_answer.clone(),
            }
        })
        .collect()
}

/// Final tally of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
    pub answered: usize,
    pub elapsed: Duration,
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} correct, elapsed {}s",
            self.correct,
            self.total,
            self.elapsed.as_secs()
        )
    }
}
