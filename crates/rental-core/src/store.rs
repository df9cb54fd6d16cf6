//! The `RentalStore` trait — the persistence seam used by the repository.
//!
//! Implemented by storage backends (e.g. `rental-store-file`). The
//! [`Repository`](crate::Repository) is the only caller; nothing else writes
//! to a store.

use crate::{customer::Customer, record::RentalRecord, vehicle::Vehicle};

/// Everything a store holds, as read back at startup.
///
/// Records still refer to vehicles and customers by key; the repository
/// resolves them and drops the ones that point nowhere.
#[derive(Debug, Clone, Default)]
pub struct StoredData {
  pub vehicles:  Vec<Vehicle>,
  pub customers: Vec<Customer>,
  pub records:   Vec<RentalRecord>,
}

/// Abstraction over an append-only rental store.
///
/// Each append is an independent single-record write; there is no batching
/// and no way to remove or rewrite an entry.
pub trait RentalStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist one newly registered vehicle.
  fn append_vehicle(&self, vehicle: &Vehicle) -> Result<(), Self::Error>;

  /// Persist one newly registered customer.
  fn append_customer(&self, customer: &Customer) -> Result<(), Self::Error>;

  /// Persist one rent or return event.
  fn append_record(&self, record: &RentalRecord) -> Result<(), Self::Error>;

  /// Read every collection back. Entries that cannot be decoded are skipped
  /// by the backend rather than failing the whole load.
  fn load(&self) -> Result<StoredData, Self::Error>;
}
