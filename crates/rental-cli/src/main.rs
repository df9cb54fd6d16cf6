//! `rental` — command-line front end for the rental record keeper.
//!
//! # Usage
//!
//! ```text
//! rental vehicle add --type car --plate ABC123 --make toyota --model corolla --year 2019
//! rental customer add --id 1 --name "Ada Lovelace"
//! rental rent --plate ABC123 --customer 1 --amount 120
//! rental return --plate ABC123 --customer 1 --fees 15
//! rental vehicle list --status Rented
//! rental history --plate ABC123
//! rental shell < session.txt
//! ```

mod commands;
mod settings;
mod shell;

use std::{
  io::{self, IsTerminal as _},
  path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use commands::Command;
use rental_core::Repository;
use rental_store_file::FileStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Vehicle rental record keeper")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rental.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

fn main() -> anyhow::Result<()> {
  // Logs go to stderr so reports on stdout stay clean.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let data_dir = settings.data_dir();
  std::fs::create_dir_all(&data_dir)
    .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

  // The one repository for this process; everything below borrows it.
  let repo = Repository::open(FileStore::new(settings.file_paths())).into_shared();

  match cli.command {
    Command::Shell => {
      let stdin = io::stdin();
      let prompt = stdin.is_terminal();
      shell::run_session(stdin.lock(), &repo, prompt)
    }
    command => commands::run(command, &repo),
  }
}
