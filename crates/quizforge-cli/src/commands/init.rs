//! The `quizforge init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizforge.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("questions").context("failed to create questions/")?;
    write_if_missing(Path::new("questions/example.json"), EXAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit questions/example.json or add your own question file");
    println!("  2. Run: quizforge validate --questions questions/example.json");
    println!("  3. Run: quizforge take");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

questions = "questions/example.json"
time_limit_secs = 300
shuffle = true
# seed = 42
address = "127.0.0.1:8080"
"#;

const EXAMPLE_QUESTIONS: &str = r#"{
  "questions": [
    {
      "question": "Which keyword declares an immutable binding in Rust?",
      "choices": ["var", "let", "const fn", "mut"],
      "correctAnswer": "let"
    },
    {
      "question": "What does `Option::None` represent?",
      "choices": ["An error", "The absence of a value", "A null pointer", "Zero"],
      "correctAnswer": "The absence of a value"
    },
    {
      "question": "Which trait enables the `?` operator on a custom error conversion?",
      "choices": ["Into", "From", "AsRef", "Deref"],
      "correctAnswer": "From"
    }
  ]
}
"#;
