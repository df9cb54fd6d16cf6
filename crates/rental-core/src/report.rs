//! Plain-text reports over the repository's collections.
//!
//! These are presentation helpers: a front end may render the same data any
//! way it likes, as long as the status filter keeps its meaning (`None` lists
//! every vehicle, `Some(s)` only those whose status is exactly `s`).

use std::fmt;

use crate::{
  record::{RentalRecord, format_amount},
  repository::Repository,
  vehicle::VehicleStatus,
};

const VEHICLE_RULE: &str = "|--------------------------------------------------------------------------------------------|";
const HISTORY_RULE: &str = "|-------------------------------------------------------------------------------|";

impl<S> Repository<S> {
  /// A table of vehicles, optionally restricted to one status.
  pub fn display_vehicles(&self, status: Option<VehicleStatus>) -> String {
    VehicleTable { repo: self, status }.to_string()
  }

  /// One indented line per customer.
  pub fn display_all_customers(&self) -> String {
    CustomerList { repo: self }.to_string()
  }

  /// A table of every rent and return event, oldest first. Customer names
  /// are looked up at render time.
  pub fn display_rental_history(&self) -> String {
    self.display_records(self.rental_history())
  }

  /// Like [`Self::display_rental_history`], for any selection of records.
  pub fn display_records<'a>(
    &self,
    records: impl IntoIterator<Item = &'a RentalRecord>,
  ) -> String {
    let records = records.into_iter().collect();
    HistoryTable { repo: self, records }.to_string()
  }
}

// ─── Renderers ───────────────────────────────────────────────────────────────

struct VehicleTable<'a, S> {
  repo:   &'a Repository<S>,
  status: Option<VehicleStatus>,
}

impl<S> fmt::Display for VehicleTable<'_, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.status {
      None => writeln!(f, "=== All Vehicles ===")?,
      Some(s) => writeln!(f, "=== {s} Vehicles ===")?,
    }
    writeln!(
      f,
      "|{:<16} | {:<12} | {:<12} | {:<12} | {:<6} | {:<18} |",
      " Type", "Plate", "Make", "Model", "Year", "Status"
    )?;
    writeln!(f, "{VEHICLE_RULE}")?;

    let mut found = false;
    for vehicle in self.repo.vehicles_with_status(self.status) {
      found = true;
      writeln!(
        f,
        "| {:<15} | {:<12} | {:<12} | {:<12} | {:<6} | {:<18} |",
        vehicle.vehicle_type().label(),
        vehicle.license_plate().as_str(),
        vehicle.make(),
        vehicle.model(),
        vehicle.year(),
        vehicle.status().to_string(),
      )?;
    }

    match (found, self.status) {
      (true, _) => Ok(()),
      (false, None) => writeln!(f, "  No Vehicles found."),
      (false, Some(s)) => writeln!(f, "  No vehicles with Status: {s}"),
    }
  }
}

struct CustomerList<'a, S> {
  repo: &'a Repository<S>,
}

impl<S> fmt::Display for CustomerList<'_, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for customer in self.repo.customers() {
      writeln!(f, "  {customer}")?;
    }
    Ok(())
  }
}

struct HistoryTable<'a, S> {
  repo:    &'a Repository<S>,
  records: Vec<&'a RentalRecord>,
}

impl<S> fmt::Display for HistoryTable<'_, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.records.is_empty() {
      return writeln!(f, "  No rental history found.");
    }

    writeln!(
      f,
      "|{:<10} | {:<12} | {:<20} | {:<12} | {:<12} |",
      " Type", "Plate", "Customer", "Date", "Amount"
    )?;
    writeln!(f, "{HISTORY_RULE}")?;

    for record in &self.records {
      let customer = self
        .repo
        .find_customer_by_id(record.customer_id())
        .map_or("(unknown)", |c| c.customer_name());
      writeln!(
        f,
        "| {:<9} | {:<12} | {:<20} | {:<12} | ${:<11} |",
        record.record_type().to_string(),
        record.license_plate().as_str(),
        customer,
        record.date().to_string(),
        format_amount(record.amount()),
      )?;
    }
    Ok(())
  }
}
