//! The `quizforge take` command.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use quizforge_core::scoring::breakdown;
use quizforge_core::shuffle::presentation_order;
use quizforge_core::{PresentationOrder, QuestionSet, ScoreResult, Session};

use super::{load_questions, resolve_config};
use crate::{render, SessionArgs};

pub async fn execute(args: SessionArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let (path, questions) = load_questions(&config)?;
    tracing::debug!("taking quiz from {}", path.display());

    let order = presentation_order(questions.len(), config.shuffle, config.seed);
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    run_quiz(Arc::new(questions), order, config.time_limit(), input, &mut out).await?;
    Ok(())
}

/// Drive one session over line-based input.
///
/// Expiry is polled before each question and again after each line is read,
/// so an answer typed after the deadline is discarded. A read that is already
/// waiting when the deadline passes is not interrupted.
pub async fn run_quiz<R, W>(
    questions: Arc<QuestionSet>,
    order: PresentationOrder,
    time_limit: Duration,
    mut input: R,
    out: &mut W,
) -> Result<ScoreResult>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Welcome to the Multiple Choice Test!")?;
    writeln!(
        out,
        "You have {} to answer {} questions.",
        render::duration(time_limit),
        questions.len()
    )?;
    writeln!(out, "Answer the following questions:")?;

    let mut session = Session::start(questions, order, time_limit)?;

    'questions: loop {
        if session.check_expiry() {
            break;
        }
        let Some(current) = session.current_question() else {
            break;
        };
        let index = current.index;
        write!(out, "\n{}", render::question(&current))?;

        loop {
            write!(out, "Your answer: ")?;
            out.flush()?;

            let Some(line) = read_line(&mut input).await? else {
                anyhow::bail!(
                    "input ended with {} of {} questions answered",
                    session.answered(),
                    session.total()
                );
            };

            if session.check_expiry() {
                break 'questions;
            }

            match session.submit_answer(index, &line) {
                Ok(_) => break,
                Err(e) if e.is_recoverable() => {
                    writeln!(out, "Invalid answer option. Please enter a valid option.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    if session.check_expiry() {
        writeln!(out, "\nTest completed due to time limit.")?;
    }

    let result = session.finalize()?;
    write!(out, "\n{}", render::score(&result))?;
    writeln!(
        out,
        "\n{}",
        render::review(&breakdown(session.questions(), session.answers()))
    )?;

    Ok(result)
}

async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .await
        .context("failed to read answer")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
