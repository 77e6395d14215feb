//! The `quizforge serve` command.

use anyhow::Result;

use quizforge_server::{AppState, SessionSettings};

use super::{load_questions, resolve_config};
use crate::SessionArgs;

pub async fn execute(args: SessionArgs, address: Option<String>) -> Result<()> {
    let config = resolve_config(&args)?;
    let (path, questions) = load_questions(&config)?;
    let address = address.unwrap_or_else(|| config.address.clone());

    tracing::info!(
        "serving {} questions from {} (time limit {}s, shuffle {})",
        questions.len(),
        path.display(),
        config.time_limit_secs,
        config.shuffle
    );

    let state = AppState::new(questions, SessionSettings::from(&config));
    quizforge_server::serve(state, &address).await
}
