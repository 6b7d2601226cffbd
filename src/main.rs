use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use intcalc::{Session, PROMPT};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

/// Integer calculator: evaluates one `+ - * /` expression per line and prints
/// the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate every line of this file instead of reading standard input.
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.file {
        Some(path) => run_script(&path),
        None if io::stdin().is_terminal() => run_repl(),
        None => run_piped(),
    }
}

fn run_script(path: &Path) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let mut session = Session::new(io::stdout(), io::stderr());
    session
        .run(BufReader::new(file))
        .with_context(|| format!("failed while evaluating {}", path.display()))?;
    tracing::debug!(lines = session.lines_read(), "script finished");
    Ok(())
}

fn run_piped() -> anyhow::Result<()> {
    let mut session = Session::new(io::stdout(), io::stderr());
    session.greet(true)?;
    session.run(io::stdin().lock())?;
    tracing::debug!(lines = session.lines_read(), "end of input");
    Ok(())
}

fn run_repl() -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new().context("could not start the line editor")?;
    let mut session = Session::new(io::stdout(), io::stderr());
    session.greet(false)?;
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                session.feed(&line)?;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("could not read from the terminal"),
        }
    }
    tracing::debug!(lines = session.lines_read(), "session closed");
    Ok(())
}
