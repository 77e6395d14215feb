//! Plain-text rendering for the interactive quiz.

use std::time::Duration;

use comfy_table::{Cell, Table};

use quizforge_core::scoring::QuestionOutcome;
use quizforge_core::{CurrentQuestion, ScoreResult};

/// `Question N: text` followed by one lettered option per line.
pub fn question(current: &CurrentQuestion<'_>) -> String {
    let mut output = format!("Question {}: {}\n", current.position, current.question.text);
    for (letter, option) in current.question.lettered_options() {
        output.push_str(&format!("{letter}. {option}\n"));
    }
    output
}

pub fn score(result: &ScoreResult) -> String {
    format!(
        "You answered {} out of {} questions correctly.\nTime taken: {}\n",
        result.correct,
        result.total,
        duration(result.elapsed)
    )
}

/// Whole-second durations like `1h2m5s`, `4m0s`, `42s`.
pub fn duration(d: Duration) -> String {
    let secs = (d.as_millis() + 500) / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}

pub fn review(outcomes: &[QuestionOutcome]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", "Result"]);

    for outcome in outcomes {
        table.add_row(vec![
            Cell::new(outcome.index + 1),
            Cell::new(&outcome.text),
            Cell::new(outcome.given.as_deref().unwrap_or("-")),
            Cell::new(&outcome.correct_answer),
            Cell::new(if outcome.correct { "OK" } else { "WRONG" }),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::Question;

    #[test]
    fn question_is_lettered() {
        let q = Question::new("What is 2 + 2?", ["3", "4", "5"], "4");
        let current = CurrentQuestion {
            index: 4,
            position: 1,
            total: 3,
            question: &q,
        };
        assert_eq!(
            question(&current),
            "Question 1: What is 2 + 2?\nA. 3\nB. 4\nC. 5\n"
        );
    }

    #[test]
    fn duration_rounds_to_seconds() {
        assert_eq!(duration(Duration::from_millis(400)), "0s");
        assert_eq!(duration(Duration::from_millis(41_600)), "42s");
        assert_eq!(duration(Duration::from_secs(300)), "5m0s");
        assert_eq!(duration(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn score_summary() {
        let result = ScoreResult {
            correct: 1,
            total: 2,
            answered: 2,
            elapsed: Duration::from_secs(65),
        };
        assert_eq!(
            score(&result),
            "You answered 1 out of 2 questions correctly.\nTime taken: 1m5s\n"
        );
    }

    #[test]
    fn review_marks_unanswered() {
        let outcomes = vec![QuestionOutcome {
            index: 0,
            text: "2+2?".into(),
            given: None,
            correct_answer: "4".into(),
            correct: false,
        }];
        let rendered = review(&outcomes).to_string();
        assert!(rendered.contains("WRONG"));
        assert!(rendered.contains("2+2?"));
    }
}
