//! CLI entry point for tally.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use tally_app::{CommandRouter, TaskBook};
use tally_store::TaskFile;

mod config;
mod render;

use config::Settings;

/// Command-driven task tracker with a durable flat-file mirror.
#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "tally: add, complete, and search tasks from one prompt"
)]
struct Cli {
    /// Task file to read and mirror (outranks the config file).
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Alternative config.toml location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single command and exit instead of starting a session.
    #[arg(long)]
    command: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing();

    let settings = Settings::load(cli.config.as_deref())?;
    let data_file = settings.data_file(cli.data_file);

    let book = TaskBook::load(TaskFile::new(data_file));
    let mut router = CommandRouter::new(book);

    match cli.command {
        Some(line) => {
            println!("{}", respond(&mut router, &line));
            Ok(())
        }
        None => run_session(&mut router),
    }
}

fn run_session(router: &mut CommandRouter<TaskFile>) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", render::GREETING)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "bye" {
            break;
        }
        writeln!(out, "{}", respond(router, &line))?;
    }

    writeln!(out, "{}", render::FAREWELL)?;
    Ok(())
}

fn respond(router: &mut CommandRouter<TaskFile>, line: &str) -> String {
    match router.run(line) {
        Ok(outcome) => render::outcome(&outcome),
        Err(err) => render::error(&err),
    }
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
