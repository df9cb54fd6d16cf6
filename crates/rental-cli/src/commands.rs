//! Subcommands and their execution against the shared repository.

use anyhow::{Context as _, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand, ValueEnum};
use rental_core::{
  SharedRepository,
  customer::Customer,
  record::RentalRecord,
  store::RentalStore,
  vehicle::{DEFAULT_SEATS, LicensePlate, Vehicle, VehicleKind, VehicleStatus},
};
use rust_decimal::Decimal;

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Register or list vehicles.
  #[command(subcommand)]
  Vehicle(VehicleCommand),

  /// Register or list customers.
  #[command(subcommand)]
  Customer(CustomerCommand),

  /// Rent an available vehicle to a customer.
  Rent(RentArgs),

  /// Return a rented vehicle.
  Return(ReturnArgs),

  /// Show rent and return events, optionally for one vehicle or customer.
  History {
    #[arg(long)]
    plate:    Option<String>,
    #[arg(long)]
    customer: Option<i32>,
    #[arg(long)]
    json:     bool,
  },

  /// Keep the repository open and read commands from stdin, one per line.
  Shell,
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
  Add(AddVehicleArgs),
  List {
    /// Only vehicles with this status (e.g. Available, Rented).
    #[arg(long, value_parser = VehicleStatus::from_name)]
    status: Option<VehicleStatus>,
    #[arg(long)]
    json:   bool,
  },
  /// Print the one-line summary of a single vehicle.
  Show {
    #[arg(long)]
    plate: String,
    #[arg(long)]
    json:  bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
  Add {
    #[arg(long)]
    id:   i32,
    #[arg(long)]
    name: String,
  },
  List {
    #[arg(long)]
    json: bool,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
  Car,
  Minibus,
  PickupTruck,
}

#[derive(Args, Debug)]
pub struct AddVehicleArgs {
  #[arg(long = "type", value_enum, default_value_t = KindArg::Car)]
  kind:       KindArg,
  #[arg(long)]
  plate:      String,
  #[arg(long)]
  make:       String,
  #[arg(long)]
  model:      String,
  #[arg(long)]
  year:       i32,
  /// Seat count (cars).
  #[arg(long, default_value_t = DEFAULT_SEATS)]
  seats:      u32,
  /// Wheelchair accessible (minibuses).
  #[arg(long)]
  accessible: bool,
  /// Cargo size (pickup trucks).
  #[arg(long)]
  cargo_size: Option<f64>,
  /// Has a trailer (pickup trucks).
  #[arg(long)]
  trailer:    bool,
}

#[derive(Args, Debug)]
pub struct RentArgs {
  #[arg(long)]
  plate:    String,
  #[arg(long)]
  customer: i32,
  #[arg(long)]
  amount:   Decimal,
  /// Defaults to today.
  #[arg(long)]
  date:     Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct ReturnArgs {
  #[arg(long)]
  plate:    String,
  #[arg(long)]
  customer: i32,
  /// Extra fees charged on return.
  #[arg(long, default_value_t = Decimal::ZERO)]
  fees:     Decimal,
  /// Defaults to today.
  #[arg(long)]
  date:     Option<NaiveDate>,
}

// ─── Execution ────────────────────────────────────────────────────────────────

pub fn run<S: RentalStore>(command: Command, repo: &SharedRepository<S>) -> Result<()> {
  match command {
    Command::Vehicle(VehicleCommand::Add(args)) => add_vehicle(args, repo),
    Command::Vehicle(VehicleCommand::List { status, json }) => {
      let repo = repo.borrow();
      if json {
        let vehicles: Vec<_> = repo.vehicles_with_status(status).collect();
        println!("{}", serde_json::to_string_pretty(&vehicles)?);
      } else {
        print!("{}", repo.display_vehicles(status));
      }
      Ok(())
    }
    Command::Vehicle(VehicleCommand::Show { plate, json }) => {
      let repo = repo.borrow();
      let Some(vehicle) = repo.find_vehicle_by_plate(plate.trim()) else {
        bail!("vehicle not found");
      };
      if json {
        println!("{}", serde_json::to_string_pretty(vehicle)?);
      } else {
        println!("{}", vehicle.info());
      }
      Ok(())
    }
    Command::Customer(CustomerCommand::Add { id, name }) => {
      let name = text_field("customer name", &name)?;
      if !repo.borrow_mut().add_customer(Customer::new(id, name)) {
        bail!("a customer with id {id} already exists");
      }
      println!("Customer added successfully.");
      Ok(())
    }
    Command::Customer(CustomerCommand::List { json }) => {
      let repo = repo.borrow();
      if json {
        println!("{}", serde_json::to_string_pretty(repo.customers())?);
      } else {
        print!("{}", repo.display_all_customers());
      }
      Ok(())
    }
    Command::Rent(args) => rent(args, repo),
    Command::Return(args) => return_vehicle(args, repo),
    Command::History { plate, customer, json } => {
      let repo = repo.borrow();
      let history = repo.rental_history();
      let records: Vec<&RentalRecord> = match (plate.as_deref(), customer) {
        (Some(plate), _) => history
          .records_for_vehicle(plate.trim())
          .filter(|r| customer.is_none_or(|id| r.customer_id() == id))
          .collect(),
        (None, Some(id)) => history.records_for_customer(id).collect(),
        (None, None) => history.iter().collect(),
      };
      if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
      } else {
        print!("{}", repo.display_records(records));
      }
      Ok(())
    }
    Command::Shell => bail!("already in a shell session"),
  }
}

/// A required free-text field. Commas and line breaks would corrupt the
/// one-line-per-entry store files, so they are refused.
fn text_field<'a>(label: &str, value: &'a str) -> Result<&'a str> {
  let value = value.trim();
  if value.is_empty() {
    bail!("{label} is required");
  }
  if value.contains([',', '\n', '\r']) {
    bail!("{label} must not contain commas or line breaks");
  }
  Ok(value)
}

fn add_vehicle<S: RentalStore>(
  args: AddVehicleArgs,
  repo: &SharedRepository<S>,
) -> Result<()> {
  let make = text_field("make", &args.make)?;
  let model = text_field("model", &args.model)?;

  let plate = LicensePlate::parse(&args.plate)?;
  let kind = match args.kind {
    KindArg::Car => VehicleKind::car(args.seats),
    KindArg::Minibus => VehicleKind::minibus(args.accessible),
    KindArg::PickupTruck => {
      let cargo_size = args
        .cargo_size
        .context("--cargo-size is required for a pickup truck")?;
      VehicleKind::pickup_truck(cargo_size, args.trailer)?
    }
  };

  let vehicle = Vehicle::new(plate, make, model, args.year, kind);
  if !repo.borrow_mut().add_vehicle(vehicle) {
    bail!("a vehicle with that license plate already exists");
  }
  println!("Vehicle added successfully.");
  Ok(())
}

/// Fail unless both the vehicle and the customer are registered.
fn ensure_known<S>(repo: &SharedRepository<S>, plate: &str, customer_id: i32) -> Result<()> {
  let repo = repo.borrow();
  if repo.find_vehicle_by_plate(plate.trim()).is_none()
    || repo.find_customer_by_id(customer_id).is_none()
  {
    bail!("vehicle or customer not found");
  }
  Ok(())
}

fn today() -> NaiveDate { Local::now().date_naive() }

fn rent<S: RentalStore>(args: RentArgs, repo: &SharedRepository<S>) -> Result<()> {
  let plate = args.plate.trim();
  ensure_known(repo, plate, args.customer)?;

  let date = args.date.unwrap_or_else(today);
  if !repo.borrow_mut().rent_vehicle(plate, args.customer, date, args.amount) {
    bail!("renting failed (vehicle might not be available)");
  }
  println!("Vehicle rented successfully.");
  Ok(())
}

fn return_vehicle<S: RentalStore>(
  args: ReturnArgs,
  repo: &SharedRepository<S>,
) -> Result<()> {
  let plate = args.plate.trim();
  ensure_known(repo, plate, args.customer)?;

  let date = args.date.unwrap_or_else(today);
  if !repo.borrow_mut().return_vehicle(plate, args.customer, date, args.fees) {
    bail!("returning failed (vehicle might not be rented)");
  }
  println!("Vehicle returned successfully.");
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::Parser;
  use rental_core::{Repository, record::RecordType};
  use rental_store_file::{FilePaths, FileStore};
  use tempfile::TempDir;

  use super::*;

  #[derive(Parser, Debug)]
  struct TestCli {
    #[command(subcommand)]
    command: Command,
  }

  fn parse(args: &[&str]) -> Command {
    TestCli::try_parse_from(std::iter::once("rental").chain(args.iter().copied()))
      .expect("arguments parse")
      .command
  }

  #[test]
  fn parses_vehicle_add() {
    let cmd = parse(&[
      "vehicle", "add", "--type", "pickup-truck", "--plate", "abc123", "--make",
      "ford", "--model", "ranger", "--year", "2018", "--cargo-size", "12.5",
      "--trailer",
    ]);
    let Command::Vehicle(VehicleCommand::Add(args)) = cmd else {
      panic!("expected vehicle add");
    };
    assert_eq!(args.kind, KindArg::PickupTruck);
    assert_eq!(args.cargo_size, Some(12.5));
    assert!(args.trailer);
    assert_eq!(args.seats, DEFAULT_SEATS);
  }

  #[test]
  fn parses_status_filter_and_rent() {
    let Command::Vehicle(VehicleCommand::List { status, json }) =
      parse(&["vehicle", "list", "--status", "Rented"])
    else {
      panic!("expected vehicle list");
    };
    assert_eq!(status, Some(VehicleStatus::Rented));
    assert!(!json);

    let Command::Rent(args) = parse(&[
      "rent", "--plate", "ABC123", "--customer", "4", "--amount", "49.90",
      "--date", "2024-02-29",
    ]) else {
      panic!("expected rent");
    };
    assert_eq!(args.amount, Decimal::new(4990, 2));
    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 2, 29));
  }

  #[test]
  fn return_fees_default_to_zero() {
    let Command::Return(args) =
      parse(&["return", "--plate", "ABC123", "--customer", "4"])
    else {
      panic!("expected return");
    };
    assert_eq!(args.fees, Decimal::ZERO);
    assert!(args.date.is_none());
  }

  #[test]
  fn status_filter_ignores_case_and_rejects_unknown_names() {
    let Command::Vehicle(VehicleCommand::List { status, .. }) =
      parse(&["vehicle", "list", "--status", "undermaintenance"])
    else {
      panic!("expected vehicle list");
    };
    assert_eq!(status, Some(VehicleStatus::UnderMaintenance));

    let err = TestCli::try_parse_from(["rental", "vehicle", "list", "--status", "lost"])
      .unwrap_err();
    assert!(err.to_string().contains("unknown vehicle status"));
  }

  // ─── Execution ──────────────────────────────────────────────────────────────

  fn session() -> (TempDir, SharedRepository<FileStore>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = Repository::open(FileStore::in_dir(dir.path())).into_shared();
    (dir, repo)
  }

  fn exec(repo: &SharedRepository<FileStore>, args: &[&str]) -> Result<()> {
    run(parse(args), repo)
  }

  fn failure(repo: &SharedRepository<FileStore>, args: &[&str]) -> String {
    exec(repo, args).expect_err("command fails").to_string()
  }

  fn stocked() -> (TempDir, SharedRepository<FileStore>) {
    let (dir, repo) = session();
    exec(&repo, &[
      "vehicle", "add", "--plate", "abc123", "--make", "ford", "--model",
      "transit", "--year", "2020",
    ])
    .unwrap();
    exec(&repo, &["customer", "add", "--id", "1", "--name", "Ada"]).unwrap();
    (dir, repo)
  }

  const RENT: &[&str] = &[
    "rent", "--plate", "ABC123", "--customer", "1", "--amount", "50", "--date",
    "2024-03-01",
  ];
  const RETURN: &[&str] = &[
    "return", "--plate", "abc123", "--customer", "1", "--fees", "10", "--date",
    "2024-03-04",
  ];

  #[test]
  fn rent_and_return_follow_status_on_one_handle() {
    let (_dir, repo) = stocked();

    exec(&repo, RENT).unwrap();
    assert_eq!(
      failure(&repo, RENT),
      "renting failed (vehicle might not be available)"
    );
    exec(&repo, RETURN).unwrap();
    assert_eq!(
      failure(&repo, RETURN),
      "returning failed (vehicle might not be rented)"
    );

    let repo = repo.borrow();
    let kinds: Vec<_> = repo
      .rental_history()
      .iter()
      .map(|r| r.record_type())
      .collect();
    assert_eq!(kinds, [RecordType::Rent, RecordType::Return]);
    assert_eq!(
      repo.find_vehicle_by_plate("ABC123").unwrap().status(),
      VehicleStatus::Available
    );
  }

  #[test]
  fn unknown_vehicle_or_customer() {
    let (_dir, repo) = stocked();
    assert_eq!(
      failure(&repo, &["rent", "--plate", "ZZZ999", "--customer", "1", "--amount", "5"]),
      "vehicle or customer not found"
    );
    assert_eq!(
      failure(&repo, &["return", "--plate", "ABC123", "--customer", "9"]),
      "vehicle or customer not found"
    );
    assert!(repo.borrow().rental_history().is_empty());
  }

  #[test]
  fn duplicates_are_reported() {
    let (_dir, repo) = stocked();
    assert_eq!(
      failure(&repo, &[
        "vehicle", "add", "--plate", "ABC123", "--make", "vw", "--model", "golf",
        "--year", "2010",
      ]),
      "a vehicle with that license plate already exists"
    );
    assert_eq!(
      failure(&repo, &["customer", "add", "--id", "1", "--name", "Grace"]),
      "a customer with id 1 already exists"
    );
  }

  #[test]
  fn vehicle_add_validation() {
    let (_dir, repo) = session();
    let pickup = |extra: &[&'static str]| {
      let mut args = vec![
        "vehicle", "add", "--type", "pickup-truck", "--plate", "PUT001", "--make",
        "ford", "--model", "ranger", "--year", "2018",
      ];
      args.extend_from_slice(extra);
      exec(&repo, &args)
    };

    assert_eq!(
      pickup(&[]).unwrap_err().to_string(),
      "--cargo-size is required for a pickup truck"
    );
    assert!(
      pickup(&["--cargo-size", "0"])
        .unwrap_err()
        .to_string()
        .contains("cargo size must be greater than zero")
    );
    assert!(
      failure(&repo, &[
        "vehicle", "add", "--plate", "AB12", "--make", "ford", "--model", "ka",
        "--year", "2001",
      ])
      .contains("invalid license plate")
    );
    assert!(repo.borrow().vehicles().is_empty());

    pickup(&["--cargo-size", "12.5"]).unwrap();
    assert_eq!(repo.borrow().vehicles().len(), 1);
  }

  #[test]
  fn separators_in_text_fields_are_refused() {
    let (dir, repo) = stocked();

    assert_eq!(
      failure(&repo, &["customer", "add", "--id", "2", "--name", "x\n5,Mallory"]),
      "customer name must not contain commas or line breaks"
    );
    assert_eq!(
      failure(&repo, &["customer", "add", "--id", "2", "--name", "Lovelace, Ada"]),
      "customer name must not contain commas or line breaks"
    );
    assert_eq!(
      failure(&repo, &["customer", "add", "--id", "2", "--name", "   "]),
      "customer name is required"
    );
    assert_eq!(
      failure(&repo, &[
        "vehicle", "add", "--plate", "XYZ789", "--make", "ford", "--model",
        "transit\r\nQQQ111", "--year", "2020",
      ]),
      "model must not contain commas or line breaks"
    );

    let paths = FilePaths::in_dir(dir.path());
    let customers = std::fs::read_to_string(&paths.customers).unwrap();
    assert_eq!(customers, "1,Ada\n");
    let vehicles = std::fs::read_to_string(&paths.vehicles).unwrap();
    assert_eq!(vehicles.lines().count(), 1);
  }

  #[test]
  fn show_and_filtered_history() {
    let (_dir, repo) = stocked();
    exec(&repo, RENT).unwrap();

    exec(&repo, &["vehicle", "show", "--plate", "abc123"]).unwrap();
    assert_eq!(
      failure(&repo, &["vehicle", "show", "--plate", "ZZZ999"]),
      "vehicle not found"
    );

    exec(&repo, &["history", "--plate", "abc123", "--customer", "1"]).unwrap();
    exec(&repo, &["history", "--customer", "2", "--json"]).unwrap();
  }
}
