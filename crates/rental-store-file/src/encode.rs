//! Line codec between domain types and the comma-separated store files.
//!
//! Formats, one record per line:
//!
//! ```text
//! vehicles.txt        licensePlate,typeTag,make,model,year
//! customers.txt       customerId,customerName
//! rental_records.txt  customerId,licensePlate,recordType,YYYY-MM-DD,amount
//! ```
//!
//! Fields are not escaped, so a comma inside a name produces a line that no
//! longer decodes. Variant-specific vehicle attributes (seats, accessibility,
//! cargo size, trailer) are not written; decoded vehicles get the defaults
//! from [`VehicleKind::with_defaults`].

use std::str::FromStr;

use chrono::NaiveDate;
use rental_core::{
  customer::Customer,
  record::{RecordType, RentalRecord, format_amount},
  vehicle::{LicensePlate, Vehicle, VehicleKind, VehicleType},
};
use rust_decimal::Decimal;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Split `line` on commas and require exactly `expected` fields.
fn fields(line: &str, expected: usize) -> Result<Vec<&str>> {
  let parts: Vec<&str> = line.split(',').collect();
  if parts.len() != expected {
    return Err(Error::FieldCount { expected, found: parts.len() });
  }
  Ok(parts)
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
  value.trim().parse().map_err(|_| Error::InvalidNumber {
    field,
    value: value.to_owned(),
  })
}

// ─── Vehicle ─────────────────────────────────────────────────────────────────

pub fn encode_vehicle(vehicle: &Vehicle) -> String {
  format!(
    "{},{},{},{},{}",
    vehicle.license_plate(),
    vehicle.vehicle_type().tag(),
    vehicle.make(),
    vehicle.model(),
    vehicle.year()
  )
}

pub fn decode_vehicle(line: &str) -> Result<Vehicle> {
  let f = fields(line, 5)?;
  let plate = LicensePlate::parse(f[0])?;
  let vehicle_type = VehicleType::from_tag(f[1].trim())?;
  let year = number("year", f[4])?;

  Ok(Vehicle::new(
    plate,
    f[2],
    f[3],
    year,
    VehicleKind::with_defaults(vehicle_type),
  ))
}

// ─── Customer ────────────────────────────────────────────────────────────────

pub fn encode_customer(customer: &Customer) -> String {
  format!("{},{}", customer.customer_id(), customer.customer_name())
}

pub fn decode_customer(line: &str) -> Result<Customer> {
  let f = fields(line, 2)?;
  Ok(Customer::new(number("customer id", f[0])?, f[1]))
}

// ─── Rental record ───────────────────────────────────────────────────────────

pub fn encode_record(record: &RentalRecord) -> String {
  format!(
    "{},{},{},{},{}",
    record.customer_id(),
    record.license_plate(),
    record.record_type(),
    record.date().format(DATE_FORMAT),
    format_amount(record.amount())
  )
}

pub fn decode_record(line: &str) -> Result<RentalRecord> {
  let f = fields(line, 5)?;
  let customer_id = number("customer id", f[0])?;
  let plate = LicensePlate::parse(f[1])?;
  let record_type = RecordType::from_tag(f[2].trim())?;
  let date = NaiveDate::parse_from_str(f[3].trim(), DATE_FORMAT)?;
  let amount = Decimal::from_str(f[4].trim())?;

  Ok(RentalRecord::new(plate, customer_id, date, amount, record_type))
}
