//! Customers — the people who rent vehicles.

use std::fmt;

use serde::Serialize;

/// An immutable customer identity. `customer_id` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
  customer_id:   i32,
  customer_name: String,
}

impl Customer {
  pub fn new(customer_id: i32, customer_name: impl Into<String>) -> Self {
    Self { customer_id, customer_name: customer_name.into() }
  }

  pub fn customer_id(&self) -> i32 { self.customer_id }

  pub fn customer_name(&self) -> &str { &self.customer_name }
}

impl fmt::Display for Customer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Customer #{}: {}", self.customer_id, self.customer_name)
  }
}
