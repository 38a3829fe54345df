//! `cardlock` — operator tool for encrypted message documents.
//!
//! Run sequence:
//! 1. Initialise the tracing subscriber (stderr, `RUST_LOG` filter).
//! 2. Parse arguments.
//! 3. Obtain the secret answer (`CARDLOCK_ANSWER`, else hidden prompt).
//! 4. Dispatch the command; all file/stdin I/O happens here at the edge.
//!
//! The answer and the plaintext are never logged at any level.

mod cli;
mod commands;

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::Password;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

/// Interactive unlock attempts before giving up.
const MAX_UNLOCK_ATTEMPTS: u32 = 3;

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encrypt { input, output } => run_encrypt(input, output),
        Command::Decrypt { input, output } => run_decrypt(input, output),
        Command::Inspect { input } => run_inspect(input),
    }
}

fn run_encrypt(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let plaintext = read_input(input.as_deref())?;
    debug!(bytes = plaintext.len(), "read plaintext body");

    let answer = secret_answer(input.is_none(), true)?;
    let document = commands::encrypt(&plaintext, &answer)?;
    write_output(output.as_deref(), &document)
}

fn run_decrypt(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let document = read_input(input.as_deref())?;
    let card = commands::parse_document(&document)?;

    let interactive = answer_from_env().is_none() && std::io::stdin().is_terminal();
    let max_attempts = if interactive { MAX_UNLOCK_ATTEMPTS } else { 1 };

    let mut attempts = 0;
    loop {
        attempts += 1;
        let answer = secret_answer(input.is_none(), false)?;
        match commands::decrypt(&card, &answer) {
            Ok(plaintext) => {
                debug!(attempts, "card unlocked");
                return write_output(output.as_deref(), &plaintext);
            }
            // One message for every cause; never reveal which it was.
            Err(_) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    bail!("{}", commands::UNLOCK_FAILED);
                }
                eprintln!(
                    "{}. {} attempt{} remaining.",
                    commands::UNLOCK_FAILED,
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
        }
    }
}

fn run_inspect(input: Option<PathBuf>) -> Result<()> {
    let document = read_input(input.as_deref())?;
    let card = commands::parse_document(&document)?;
    print!("{}", commands::inspect(&card)?);
    Ok(())
}

/// Read the whole input from a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Write to a file, or stdout when no path is given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            std::io::stdout()
                .write_all(content.as_bytes())
                .context("failed to write stdout")?;
            Ok(())
        }
    }
}

/// Read the answer from the environment; empty values count as unset.
fn answer_from_env() -> Option<String> {
    std::env::var("CARDLOCK_ANSWER")
        .ok()
        .filter(|v| !v.is_empty())
}

/// Obtain the secret answer.
///
/// Environment first, hidden prompt second. `stdin_taken` is true when the
/// command is already consuming stdin as its input, in which case an
/// interactive prompt is impossible. The answer is passed through exactly
/// as entered; only fully empty answers are rejected, and that rejection
/// lives here rather than in the cipher.
fn secret_answer(stdin_taken: bool, confirm: bool) -> Result<String> {
    if let Some(answer) = answer_from_env() {
        return Ok(answer);
    }
    if stdin_taken || !std::io::stdin().is_terminal() {
        bail!("no terminal available for the answer prompt; set CARDLOCK_ANSWER or use --in");
    }

    let mut prompt = Password::new().with_prompt("Secret answer");
    if confirm {
        prompt = prompt.with_confirmation("Repeat answer", "Answers do not match");
    }
    let answer = prompt.interact().context("failed to read answer")?;
    if answer.is_empty() {
        bail!("secret answer must not be empty");
    }
    Ok(answer)
}
