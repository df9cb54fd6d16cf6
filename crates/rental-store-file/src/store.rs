//! [`FileStore`] — the flat-file implementation of [`RentalStore`].

use std::{
  fs::{self, OpenOptions},
  io::{ErrorKind, Write as _},
  path::{Path, PathBuf},
};

use rental_core::{
  customer::Customer,
  record::RentalRecord,
  store::{RentalStore, StoredData},
  vehicle::Vehicle,
};
use tracing::{debug, error, warn};

use crate::{
  Error, Result,
  encode::{
    decode_customer, decode_record, decode_vehicle, encode_customer,
    encode_record, encode_vehicle,
  },
};

pub const VEHICLES_FILE: &str = "vehicles.txt";
pub const CUSTOMERS_FILE: &str = "customers.txt";
pub const RECORDS_FILE: &str = "rental_records.txt";

// ─── Paths ───────────────────────────────────────────────────────────────────

/// Locations of the three store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePaths {
  pub vehicles:  PathBuf,
  pub customers: PathBuf,
  pub records:   PathBuf,
}

impl FilePaths {
  /// The default file names inside `dir`.
  pub fn in_dir(dir: impl AsRef<Path>) -> Self {
    let dir = dir.as_ref();
    Self {
      vehicles:  dir.join(VEHICLES_FILE),
      customers: dir.join(CUSTOMERS_FILE),
      records:   dir.join(RECORDS_FILE),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A rental store kept in three append-only text files.
///
/// No file handle is held between calls: every append opens its file in
/// append mode, writes one line, and closes it again.
#[derive(Debug, Clone)]
pub struct FileStore {
  paths: FilePaths,
}

impl FileStore {
  pub fn new(paths: FilePaths) -> Self { Self { paths } }

  /// A store using the default file names inside `dir`.
  pub fn in_dir(dir: impl AsRef<Path>) -> Self { Self::new(FilePaths::in_dir(dir)) }

  pub fn paths(&self) -> &FilePaths { &self.paths }

  fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    file.flush()?;
    Ok(())
  }

  /// Decode every non-blank line of `path`, skipping the ones that fail.
  /// A missing file reads as empty.
  fn read_all<T>(path: &Path, decode: fn(&str) -> Result<T>) -> Result<Vec<T>> {
    let bytes = match fs::read(path) {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(file = %path.display(), "store file does not exist yet");
        return Ok(Vec::new());
      }
      Err(e) => return Err(Error::Io(e)),
    };

    let text = String::from_utf8_lossy(&bytes);
    let mut items = Vec::new();
    for (index, line) in text.lines().enumerate() {
      if line.trim().is_empty() {
        continue;
      }
      match decode(line) {
        Ok(item) => items.push(item),
        Err(e) => warn!(
          file = %path.display(),
          line = index + 1,
          error = %e,
          "skipping malformed line"
        ),
      }
    }
    Ok(items)
  }

  /// Like [`Self::read_all`], but an unreadable file is logged and treated
  /// as empty so the other collections still load.
  fn load_file<T>(path: &Path, decode: fn(&str) -> Result<T>) -> Vec<T> {
    Self::read_all(path, decode).unwrap_or_else(|e| {
      error!(file = %path.display(), error = %e, "error loading store file");
      Vec::new()
    })
  }
}

// ─── RentalStore impl ────────────────────────────────────────────────────────

impl RentalStore for FileStore {
  type Error = Error;

  fn append_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
    Self::append_line(&self.paths.vehicles, &encode_vehicle(vehicle))
  }

  fn append_customer(&self, customer: &Customer) -> Result<()> {
    Self::append_line(&self.paths.customers, &encode_customer(customer))
  }

  fn append_record(&self, record: &RentalRecord) -> Result<()> {
    Self::append_line(&self.paths.records, &encode_record(record))
  }

  fn load(&self) -> Result<StoredData> {
    Ok(StoredData {
      vehicles:  Self::load_file(&self.paths.vehicles, decode_vehicle),
      customers: Self::load_file(&self.paths.customers, decode_customer),
      records:   Self::load_file(&self.paths.records, decode_record),
    })
  }
}
