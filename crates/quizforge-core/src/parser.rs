//! Question file loader.
//!
//! Reads question sets from JSON (`{"questions": [{"question", "choices",
//! "correctAnswer"}]}`) or TOML (`[[questions]]` tables) and validates them
//! into a [`QuestionSet`].

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionSet};

/// Supported question file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFormat {
    Json,
    Toml,
}

impl QuestionFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(QuestionFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(QuestionFormat::Toml),
            _ => anyhow::bail!(
                "unsupported question file '{}': expected a .json or .toml file",
                path.display()
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonQuestionFile {
    questions: Vec<JsonQuestion>,
}

#[derive(Debug, Deserialize)]
struct JsonQuestion {
    question: String,
    choices: Vec<String>,
    #[serde(rename = "correctAnswer")]
    correct_answer: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    question: String,
    choices: Vec<String>,
    correct_answer: String,
}

/// Load and validate a question file.
pub fn load_question_set(path: &Path) -> Result<QuestionSet> {
    let format = QuestionFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;

    let set = parse_question_set_str(&content, format)
        .inspect_err(|_| tracing::warn!("rejected question file {}", path.display()))
        .with_context(|| format!("invalid question file: {}", path.display()))?;
    tracing::debug!("loaded {} questions from {}", set.len(), path.display());
    Ok(set)
}

/// Parse and validate question file content (useful for testing).
pub fn parse_question_set_str(content: &str, format: QuestionFormat) -> Result<QuestionSet> {
    let questions: Vec<Question> = match format {
        QuestionFormat::Json => {
            let parsed: JsonQuestionFile =
                serde_json::from_str(content).context("failed to parse JSON")?;
            parsed
                .questions
                .into_iter()
                .map(|q| Question::new(q.question, q.choices, q.correct_answer))
                .collect()
        }
        QuestionFormat::Toml => {
            let parsed: TomlQuestionFile =
                toml::from_str(content).context("failed to parse TOML")?;
            parsed
                .questions
                .into_iter()
                .map(|q| Question::new(q.question, q.choices, q.correct_answer))
                .collect()
        }
    };

    Ok(QuestionSet::load(questions)?)
}

/// A non-fatal issue found in a question set.
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// 1-based question position, if the warning is about one question.
    pub position: Option<usize>,
    pub message: String,
}

/// Check a loaded question set for likely authoring mistakes.
pub fn lint_question_set(set: &QuestionSet) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    let mut seen_text = HashSet::new();
    for (i, q) in set.iter().enumerate() {
        if !seen_text.insert(q.text.trim().to_lowercase()) {
            warnings.push(LintWarning {
                position: Some(i + 1),
                message: format!("duplicate question text: {}", q.text),
            });
        }
    }

    for (i, q) in set.iter().enumerate() {
        let exact = q.options.iter().any(|o| o.trim() == q.correct_answer.trim());
        if !exact {
            warnings.push(LintWarning {
                position: Some(i + 1),
                message: format!(
                    "correct answer '{}' only matches an option when ignoring case",
                    q.correct_answer
                ),
            });
        }
    }

    warnings
}
