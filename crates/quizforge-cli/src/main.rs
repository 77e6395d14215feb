//! quizforge CLI: take a timed quiz in the terminal or serve it over HTTP.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Timed multiple-choice quiz engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by the commands that start sessions.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Question file (.json or .toml); defaults to `questions` from the config
    #[arg(long, short)]
    questions: Option<PathBuf>,

    /// Time limit in seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Present questions in file order
    #[arg(long)]
    no_shuffle: bool,

    /// Shuffle seed, for a reproducible question order
    #[arg(long)]
    seed: Option<u64>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Serve the quiz over HTTP
    Serve {
        #[command(flatten)]
        session: SessionArgs,

        /// Address to bind, e.g. 127.0.0.1:8080
        #[arg(long)]
        address: Option<String>,
    },

    /// Validate a question file
    Validate {
        /// Question file (.json or .toml)
        #[arg(long, short)]
        questions: PathBuf,
    },

    /// Create a starter config and example question file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG replaces the default entirely when set.
    let default_directive = match cli.command {
        Commands::Serve { .. } => "quizforge=info",
        _ => "quizforge=warn",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let result = match cli.command {
        Commands::Take { session } => commands::take::execute(session).await,
        Commands::Serve { session, address } => commands::serve::execute(session, address).await,
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
