//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::parser::{lint_question_set, load_question_set};

pub fn execute(path: PathBuf) -> Result<()> {
    let set = load_question_set(&path)?;
    println!("Question set: {} ({} questions)", path.display(), set.len());

    let warnings = lint_question_set(&set);
    for w in &warnings {
        let prefix = w
            .position
            .map(|p| format!("  [question {p}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
