//! Error type for `rental-store-file`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("core error: {0}")]
  Core(#[from] rental_core::Error),

  #[error("expected {expected} fields, found {found}")]
  FieldCount { expected: usize, found: usize },

  #[error("invalid {field}: {value:?}")]
  InvalidNumber { field: &'static str, value: String },

  #[error("date parse error: {0}")]
  DateParse(#[from] chrono::ParseError),

  #[error("decimal parse error: {0}")]
  Decimal(#[from] rust_decimal::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
