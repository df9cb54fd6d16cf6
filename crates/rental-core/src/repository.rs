//! [`Repository`] — owner of the fleet, the customer list and the rental
//! history.
//!
//! The repository enforces the uniqueness of plates and customer ids, drives
//! the Available ⇄ Rented transitions, and forwards every accepted mutation
//! to its [`RentalStore`]. Persistence is best effort: a failed write is
//! logged and the in-memory change stands.

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::{
  customer::Customer,
  record::{RecordType, RentalHistory, RentalRecord},
  store::{RentalStore, StoredData},
  vehicle::{Vehicle, VehicleStatus},
};

/// A handle to the process's single repository. Clones share one instance.
pub type SharedRepository<S> = Rc<RefCell<Repository<S>>>;

// ─── Repository ──────────────────────────────────────────────────────────────

/// In-memory rental state backed by an append-only store.
///
/// Not thread-safe: the collections and the store are used without locking,
/// so one repository belongs to one thread.
pub struct Repository<S> {
  store:     S,
  vehicles:  Vec<Vehicle>,
  customers: Vec<Customer>,
  history:   RentalHistory,
}

impl<S: RentalStore> Repository<S> {
  /// Load everything `store` holds and wrap it in a repository.
  ///
  /// A store that cannot be read at all yields an empty repository; the
  /// failure is logged rather than returned.
  pub fn open(store: S) -> Self {
    let mut repo = Self {
      store,
      vehicles: Vec::new(),
      customers: Vec::new(),
      history: RentalHistory::new(),
    };

    match repo.store.load() {
      Ok(data) => repo.restore(data),
      Err(e) => error!(error = %e, "failed to load rental data, starting empty"),
    }
    repo
  }

  /// Move the repository behind a shared handle for the composition root to
  /// hand out.
  pub fn into_shared(self) -> SharedRepository<S> { Rc::new(RefCell::new(self)) }

  fn restore(&mut self, data: StoredData) {
    for vehicle in data.vehicles {
      if self.contains_plate(vehicle.license_plate().as_str()) {
        warn!(plate = %vehicle.license_plate(), "skipping duplicate stored vehicle");
        continue;
      }
      self.vehicles.push(vehicle);
    }

    for customer in data.customers {
      if self.find_customer_by_id(customer.customer_id()).is_some() {
        warn!(
          customer_id = customer.customer_id(),
          "skipping duplicate stored customer"
        );
        continue;
      }
      self.customers.push(customer);
    }

    for record in data.records {
      let resolved = self.contains_plate(record.license_plate().as_str())
        && self.find_customer_by_id(record.customer_id()).is_some();
      if !resolved {
        debug!(
          plate = %record.license_plate(),
          customer_id = record.customer_id(),
          "dropping rental record with unknown vehicle or customer"
        );
        continue;
      }
      self.history.add_record(record);
    }

    info!(
      vehicles = self.vehicles.len(),
      customers = self.customers.len(),
      records = self.history.len(),
      "loaded rental data"
    );
  }

  // ── Registration ──────────────────────────────────────────────────────────

  /// Register `vehicle` unless its plate is already taken (ignoring case).
  pub fn add_vehicle(&mut self, vehicle: Vehicle) -> bool {
    if self.contains_plate(vehicle.license_plate().as_str()) {
      info!(
        plate = %vehicle.license_plate(),
        "a vehicle with this license plate already exists"
      );
      return false;
    }

    if let Err(e) = self.store.append_vehicle(&vehicle) {
      error!(plate = %vehicle.license_plate(), error = %e, "error saving vehicle");
    }
    info!(plate = %vehicle.license_plate(), "vehicle added");
    self.vehicles.push(vehicle);
    true
  }

  /// Register `customer` unless its id is already taken.
  pub fn add_customer(&mut self, customer: Customer) -> bool {
    if self.find_customer_by_id(customer.customer_id()).is_some() {
      info!(
        customer_id = customer.customer_id(),
        "a customer with this id already exists"
      );
      return false;
    }

    if let Err(e) = self.store.append_customer(&customer) {
      error!(
        customer_id = customer.customer_id(),
        error = %e,
        "error saving customer"
      );
    }
    info!(customer_id = customer.customer_id(), "customer added");
    self.customers.push(customer);
    true
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Rent an available vehicle to a customer, logging a RENT record.
  pub fn rent_vehicle(
    &mut self,
    plate: &str,
    customer_id: i32,
    date: NaiveDate,
    amount: Decimal,
  ) -> bool {
    self.transition(plate, customer_id, date, amount, RecordType::Rent)
  }

  /// Take back a rented vehicle, logging a RETURN record whose amount is the
  /// extra fees charged.
  pub fn return_vehicle(
    &mut self,
    plate: &str,
    customer_id: i32,
    date: NaiveDate,
    extra_fees: Decimal,
  ) -> bool {
    self.transition(plate, customer_id, date, extra_fees, RecordType::Return)
  }

  fn transition(
    &mut self,
    plate: &str,
    customer_id: i32,
    date: NaiveDate,
    amount: Decimal,
    record_type: RecordType,
  ) -> bool {
    let (from, to, refusal) = match record_type {
      RecordType::Rent => (
        VehicleStatus::Available,
        VehicleStatus::Rented,
        "vehicle is not available for renting",
      ),
      RecordType::Return => (
        VehicleStatus::Rented,
        VehicleStatus::Available,
        "vehicle is not rented",
      ),
    };

    let Some(customer_name) = self
      .find_customer_by_id(customer_id)
      .map(|c| c.customer_name().to_owned())
    else {
      info!(customer_id, "customer not found");
      return false;
    };

    let Some(vehicle) = self
      .vehicles
      .iter_mut()
      .find(|v| v.license_plate().matches(plate))
    else {
      info!(plate, "vehicle not found");
      return false;
    };

    if vehicle.status() != from {
      info!(plate = %vehicle.license_plate(), status = %vehicle.status(), "{refusal}");
      return false;
    }

    vehicle.set_status(to);
    let record = RentalRecord::new(
      vehicle.license_plate().clone(),
      customer_id,
      date,
      amount,
      record_type,
    );

    match record_type {
      RecordType::Rent => info!(plate = %record.license_plate(), "vehicle rented to {customer_name}"),
      RecordType::Return => info!(plate = %record.license_plate(), "vehicle returned by {customer_name}"),
    }

    if let Err(e) = self.store.append_record(&record) {
      error!(plate = %record.license_plate(), error = %e, "error saving rental record");
    }
    self.history.add_record(record);
    true
  }
}

impl<S> Repository<S> {
  // ── Lookups ───────────────────────────────────────────────────────────────

  /// The vehicle whose plate equals `plate`, ignoring case.
  pub fn find_vehicle_by_plate(&self, plate: &str) -> Option<&Vehicle> {
    self.vehicles.iter().find(|v| v.license_plate().matches(plate))
  }

  pub fn find_customer_by_id(&self, customer_id: i32) -> Option<&Customer> {
    self.customers.iter().find(|c| c.customer_id() == customer_id)
  }

  fn contains_plate(&self, plate: &str) -> bool {
    self.find_vehicle_by_plate(plate).is_some()
  }

  // ── Views ─────────────────────────────────────────────────────────────────

  pub fn vehicles(&self) -> &[Vehicle] { &self.vehicles }

  pub fn customers(&self) -> &[Customer] { &self.customers }

  pub fn rental_history(&self) -> &RentalHistory { &self.history }

  /// Vehicles in registration order; `None` means every status.
  pub fn vehicles_with_status(
    &self,
    status: Option<VehicleStatus>,
  ) -> impl Iterator<Item = &Vehicle> + '_ {
    self
      .vehicles
      .iter()
      .filter(move |v| status.is_none_or(|s| v.status() == s))
  }

  #[cfg(test)]
  pub(crate) fn store(&self) -> &S { &self.store }
}
