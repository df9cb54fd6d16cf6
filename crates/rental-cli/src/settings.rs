//! Runtime configuration: an optional TOML file layered under `RENTAL_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rental_store_file::FilePaths;
use serde::Deserialize;

/// Where the store files live.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
  pub data_dir:       PathBuf,
  pub vehicles_file:  String,
  pub customers_file: String,
  pub records_file:   String,
}

impl Settings {
  /// Read `path` (if it exists) and the environment, falling back to the
  /// defaults for anything neither sets.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("data_dir", ".")?
      .set_default("vehicles_file", "vehicles.txt")?
      .set_default("customers_file", "customers.txt")?
      .set_default("records_file", "rental_records.txt")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("RENTAL"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// The data directory, resolved against `$HOME` when it starts at `~`.
  pub fn data_dir(&self) -> PathBuf { under_home(&self.data_dir) }

  pub fn file_paths(&self) -> FilePaths {
    let dir = self.data_dir();
    FilePaths {
      vehicles:  dir.join(&self.vehicles_file),
      customers: dir.join(&self.customers_file),
      records:   dir.join(&self.records_file),
    }
  }
}

fn under_home(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
