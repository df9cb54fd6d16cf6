//! `rental shell` — a long-lived session over one repository.
//!
//! Each process reloads vehicles as Available, so rent/return pairs only see
//! each other's status inside a session. Every input line is parsed as a
//! `rental` subcommand; a failing line is reported and the session goes on.

use std::io::{self, BufRead, Write as _};

use anyhow::Result;
use clap::Parser;
use rental_core::{SharedRepository, store::RentalStore};
use tracing::debug;

use crate::commands::{self, Command};

#[derive(Parser, Debug)]
#[command(name = "rental", no_binary_name = true, disable_version_flag = true)]
struct Line {
  #[command(subcommand)]
  command: Command,
}

/// Run commands from `input` until it ends or a line reads `quit`/`exit`.
pub fn run_session<S: RentalStore>(
  input: impl BufRead,
  repo: &SharedRepository<S>,
  prompt: bool,
) -> Result<()> {
  show_prompt(prompt);
  for line in input.lines() {
    let line = line?;
    let line = line.trim();

    match line {
      "" => {}
      "quit" | "exit" => break,
      _ if line.starts_with('#') => {}
      _ => execute(line, repo),
    }
    show_prompt(prompt);
  }
  debug!("shell session ended");
  Ok(())
}

fn execute<S: RentalStore>(line: &str, repo: &SharedRepository<S>) {
  let words = match split_words(line) {
    Ok(words) => words,
    Err(e) => {
      eprintln!("Error: {e}");
      return;
    }
  };

  match Line::try_parse_from(words) {
    Ok(Line { command }) => {
      if let Err(e) = commands::run(command, repo) {
        eprintln!("Error: {e:#}");
      }
    }
    // Help and usage errors alike; clap knows which stream they belong on.
    Err(e) => {
      e.print().ok();
    }
  }
}

fn show_prompt(prompt: bool) {
  if prompt {
    print!("rental> ");
    io::stdout().flush().ok();
  }
}

/// Split a command line on whitespace, keeping single- or double-quoted
/// runs together.
fn split_words(line: &str) -> Result<Vec<String>> {
  let mut words = Vec::new();
  let mut current = String::new();
  let mut in_word = false;
  let mut quote = None;

  for c in line.chars() {
    match (quote, c) {
      (Some(q), c) if c == q => quote = None,
      (Some(_), c) => current.push(c),
      (None, '"' | '\'') => {
        quote = Some(c);
        in_word = true;
      }
      (None, c) if c.is_whitespace() => {
        if in_word {
          words.push(std::mem::take(&mut current));
          in_word = false;
        }
      }
      (None, c) => {
        current.push(c);
        in_word = true;
      }
    }
  }

  if let Some(q) = quote {
    anyhow::bail!("unterminated {q} quote");
  }
  if in_word {
    words.push(current);
  }
  Ok(words)
}
