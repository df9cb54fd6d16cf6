//! Rental records and the append-only rental history.
//!
//! A record refers to its vehicle and customer by key rather than holding a
//! copy of them; names and plates are resolved through the repository when a
//! record is displayed.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result, vehicle::LicensePlate};

// ─── Record type ─────────────────────────────────────────────────────────────

/// Whether a record opens a rental or closes one.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordType {
  Rent,
  Return,
}

impl RecordType {
  pub fn from_tag(tag: &str) -> Result<Self> {
    tag
      .parse()
      .map_err(|_| Error::UnknownRecordType(tag.to_owned()))
  }
}

/// Format `amount` with exactly two decimal places (`50` → `50.00`).
pub fn format_amount(amount: Decimal) -> String {
  let mut rounded =
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(2);
  rounded.to_string()
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One rent or return event. Never modified once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
  license_plate: LicensePlate,
  customer_id:   i32,
  date:          NaiveDate,
  amount:        Decimal,
  record_type:   RecordType,
}

impl RentalRecord {
  pub fn new(
    license_plate: LicensePlate,
    customer_id: i32,
    date: NaiveDate,
    amount: Decimal,
    record_type: RecordType,
  ) -> Self {
    Self { license_plate, customer_id, date, amount, record_type }
  }

  pub fn license_plate(&self) -> &LicensePlate { &self.license_plate }

  pub fn customer_id(&self) -> i32 { self.customer_id }

  pub fn date(&self) -> NaiveDate { self.date }

  /// Rental fee for a RENT record, extra fees for a RETURN record.
  pub fn amount(&self) -> Decimal { self.amount }

  pub fn record_type(&self) -> RecordType { self.record_type }
}

// ─── History ─────────────────────────────────────────────────────────────────

/// Rental records in the order they happened.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RentalHistory {
  records: Vec<RentalRecord>,
}

impl RentalHistory {
  pub fn new() -> Self { Self::default() }

  pub fn add_record(&mut self, record: RentalRecord) {
    self.records.push(record);
  }

  pub fn records(&self) -> &[RentalRecord] { &self.records }

  pub fn iter(&self) -> std::slice::Iter<'_, RentalRecord> {
    self.records.iter()
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Records for the vehicle with `plate` (case-insensitive), oldest first.
  pub fn records_for_vehicle<'a>(
    &'a self,
    plate: &'a str,
  ) -> impl Iterator<Item = &'a RentalRecord> + 'a {
    self
      .records
      .iter()
      .filter(move |r| r.license_plate.matches(plate))
  }

  /// Records for the customer with `customer_id`, oldest first.
  pub fn records_for_customer(
    &self,
    customer_id: i32,
  ) -> impl Iterator<Item = &RentalRecord> + '_ {
    self
      .records
      .iter()
      .filter(move |r| r.customer_id == customer_id)
  }
}

impl<'a> IntoIterator for &'a RentalHistory {
  type Item = &'a RentalRecord;
  type IntoIter = std::slice::Iter<'a, RentalRecord>;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(plate: &str, customer_id: i32, kind: RecordType) -> RentalRecord {
    RentalRecord::new(
      LicensePlate::parse(plate).unwrap(),
      customer_id,
      NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
      Decimal::new(4999, 2),
      kind,
    )
  }

  #[test]
  fn record_type_tags() {
    assert_eq!(RecordType::Rent.to_string(), "RENT");
    assert_eq!(RecordType::Return.to_string(), "RETURN");
    assert_eq!(RecordType::from_tag("RETURN").unwrap(), RecordType::Return);
    assert!(matches!(
      RecordType::from_tag("LEASE"),
      Err(Error::UnknownRecordType(_))
    ));
  }

  #[test]
  fn amounts_have_two_decimals() {
    assert_eq!(format_amount(Decimal::new(50, 0)), "50.00");
    assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
    assert_eq!(format_amount(Decimal::new(-75, 1)), "-7.50");
  }

  #[test]
  fn history_keeps_insertion_order() {
    let mut history = RentalHistory::new();
    assert!(history.is_empty());

    history.add_record(record("ABC123", 1, RecordType::Rent));
    history.add_record(record("XYZ789", 2, RecordType::Rent));
    history.add_record(record("ABC123", 1, RecordType::Return));

    let kinds: Vec<_> = history.iter().map(RentalRecord::record_type).collect();
    assert_eq!(kinds, [RecordType::Rent, RecordType::Rent, RecordType::Return]);
    assert_eq!(history.len(), 3);
  }

  #[test]
  fn history_filters_by_vehicle_and_customer() {
    let mut history = RentalHistory::new();
    history.add_record(record("ABC123", 1, RecordType::Rent));
    history.add_record(record("XYZ789", 2, RecordType::Rent));
    history.add_record(record("ABC123", 1, RecordType::Return));

    assert_eq!(history.records_for_vehicle("abc123").count(), 2);
    assert_eq!(history.records_for_customer(2).count(), 1);
    assert_eq!(history.records_for_customer(3).count(), 0);
  }
}
