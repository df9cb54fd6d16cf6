//! Error types for `rental-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "invalid license plate {0:?}: expected three letters followed by three \
     digits (e.g. ABC123)"
  )]
  InvalidPlate(String),

  #[error("license plate is required")]
  MissingPlate,

  #[error("cargo size must be greater than zero, got {0}")]
  InvalidCargoSize(f64),

  #[error("unknown vehicle type: {0:?}")]
  UnknownVehicleType(String),

  #[error("unknown record type: {0:?}")]
  UnknownRecordType(String),

  #[error("unknown vehicle status: {0:?}")]
  UnknownStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
