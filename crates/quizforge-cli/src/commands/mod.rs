pub mod init;
pub mod serve;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::{load_config_from, QuizConfig};
use quizforge_core::parser::load_question_set;
use quizforge_core::QuestionSet;

use crate::SessionArgs;

/// Load the config and let command-line flags override it.
fn resolve_config(args: &SessionArgs) -> Result<QuizConfig> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(questions) = &args.questions {
        config.questions = Some(questions.clone());
    }
    if let Some(secs) = args.time_limit {
        config.time_limit_secs = secs;
    }
    if args.no_shuffle {
        config.shuffle = false;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn load_questions(config: &QuizConfig) -> Result<(PathBuf, QuestionSet)> {
    let Some(path) = config.questions.clone() else {
        anyhow::bail!(
            "no question file given: pass --questions or set `questions` in quizforge.toml"
        );
    };
    let set = load_question_set(&path)?;
    Ok((path, set))
}
