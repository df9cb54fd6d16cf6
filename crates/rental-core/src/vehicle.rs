//! Vehicles — the rentable assets of the fleet.
//!
//! Every vehicle shares the same identity fields (plate, make, model, year)
//! and a lifecycle [`VehicleStatus`]. Variant-specific attributes live in
//! [`VehicleKind`], a closed set of kinds.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

static PLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Z]{3}[0-9]{3}$").expect("plate pattern compiles")
});

// ─── License plate ───────────────────────────────────────────────────────────

/// A validated, upper-case license plate: three letters then three digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicensePlate(String);

impl LicensePlate {
  /// Trim and upper-case `input`, then check it against the plate format.
  pub fn parse(input: &str) -> Result<Self> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(Error::MissingPlate);
    }

    let normalized = trimmed.to_uppercase();
    if PLATE_PATTERN.is_match(&normalized) {
      Ok(Self(normalized))
    } else {
      Err(Error::InvalidPlate(input.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Case-insensitive comparison against raw text.
  pub fn matches(&self, other: &str) -> bool {
    self.0.eq_ignore_ascii_case(other)
  }
}

impl FromStr for LicensePlate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<Option<&str>> for LicensePlate {
  type Error = Error;

  fn try_from(input: Option<&str>) -> Result<Self> {
    input.map_or(Err(Error::MissingPlate), Self::parse)
  }
}

impl TryFrom<String> for LicensePlate {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<LicensePlate> for String {
  fn from(plate: LicensePlate) -> Self { plate.0 }
}

impl fmt::Display for LicensePlate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle state of a vehicle.
///
/// Only `Available` and `Rented` are driven by the repository; the remaining
/// states exist for manual bookkeeping.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum VehicleStatus {
  #[default]
  Available,
  Held,
  Rented,
  UnderMaintenance,
  OutOfService,
}

impl VehicleStatus {
  /// Parse a status name, ignoring ASCII case.
  pub fn from_name(name: &str) -> Result<Self> {
    name
      .trim()
      .parse()
      .map_err(|_| Error::UnknownStatus(name.to_owned()))
  }
}

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Seat count assumed for a car whose seats were never recorded.
pub const DEFAULT_SEATS: u32 = 5;
/// Cargo size assumed for a pickup truck whose cargo size was never recorded.
pub const DEFAULT_CARGO_SIZE: f64 = 100.0;

/// The fieldless discriminant of [`VehicleKind`]; its `Display` form is the
/// tag written to storage.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum VehicleType {
  Car,
  Minibus,
  PickupTruck,
}

impl VehicleType {
  /// The storage tag (`Car`, `Minibus`, `PickupTruck`).
  pub fn tag(self) -> &'static str { self.into() }

  /// Human-readable label used in reports.
  pub fn label(self) -> &'static str {
    match self {
      Self::Car => "Car",
      Self::Minibus => "Minibus",
      Self::PickupTruck => "Pickup Truck",
    }
  }

  pub fn from_tag(tag: &str) -> Result<Self> {
    tag
      .parse()
      .map_err(|_| Error::UnknownVehicleType(tag.to_owned()))
  }
}

/// Per-variant attributes of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VehicleKind {
  Car { seats: u32 },
  Minibus { accessible: bool },
  PickupTruck { cargo_size: f64, has_trailer: bool },
}

impl VehicleKind {
  pub fn car(seats: u32) -> Self { Self::Car { seats } }

  pub fn minibus(accessible: bool) -> Self { Self::Minibus { accessible } }

  /// A pickup truck; `cargo_size` must be strictly positive.
  pub fn pickup_truck(cargo_size: f64, has_trailer: bool) -> Result<Self> {
    if cargo_size.is_nan() || cargo_size <= 0.0 {
      return Err(Error::InvalidCargoSize(cargo_size));
    }
    Ok(Self::PickupTruck { cargo_size, has_trailer })
  }

  /// A kind of the given type with every variant field at its default.
  /// Used when rebuilding vehicles from storage, which does not keep these
  /// fields.
  pub fn with_defaults(vehicle_type: VehicleType) -> Self {
    match vehicle_type {
      VehicleType::Car => Self::Car { seats: DEFAULT_SEATS },
      VehicleType::Minibus => Self::Minibus { accessible: false },
      VehicleType::PickupTruck => Self::PickupTruck {
        cargo_size:  DEFAULT_CARGO_SIZE,
        has_trailer: false,
      },
    }
  }

  pub fn vehicle_type(&self) -> VehicleType {
    match self {
      Self::Car { .. } => VehicleType::Car,
      Self::Minibus { .. } => VehicleType::Minibus,
      Self::PickupTruck { .. } => VehicleType::PickupTruck,
    }
  }
}

// ─── Vehicle ─────────────────────────────────────────────────────────────────

/// A rentable vehicle.
///
/// Status starts as [`VehicleStatus::Available`] and only changes through
/// the repository's rent/return operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
  license_plate: LicensePlate,
  make:          String,
  model:         String,
  year:          i32,
  status:        VehicleStatus,
  kind:          VehicleKind,
}

impl Vehicle {
  /// Build an available vehicle. `make` and `model` are capitalized.
  pub fn new(
    license_plate: LicensePlate,
    make: &str,
    model: &str,
    year: i32,
    kind: VehicleKind,
  ) -> Self {
    Self {
      license_plate,
      make: capitalize(make),
      model: capitalize(model),
      year,
      status: VehicleStatus::default(),
      kind,
    }
  }

  pub fn license_plate(&self) -> &LicensePlate { &self.license_plate }

  pub fn make(&self) -> &str { &self.make }

  pub fn model(&self) -> &str { &self.model }

  pub fn year(&self) -> i32 { self.year }

  pub fn status(&self) -> VehicleStatus { self.status }

  pub fn kind(&self) -> &VehicleKind { &self.kind }

  pub fn vehicle_type(&self) -> VehicleType { self.kind.vehicle_type() }

  pub(crate) fn set_status(&mut self, status: VehicleStatus) {
    self.status = status;
  }

  /// One-line pipe-delimited summary.
  pub fn info(&self) -> String {
    format!(
      "| {} | {} | {} | {} | {} |",
      self.license_plate, self.make, self.model, self.year, self.status
    )
  }
}

/// Trim, lower-case, then upper-case the first character.
fn capitalize(input: &str) -> String {
  let lower = input.trim().to_lowercase();
  let mut chars = lower.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
