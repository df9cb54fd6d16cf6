//! Core types for the rental record keeper.
//!
//! Entities, validation, the [`RentalStore`](store::RentalStore) persistence
//! seam, and the [`Repository`](repository::Repository) that enforces the
//! fleet's invariants. This crate performs no I/O of its own; storage
//! backends (e.g. `rental-store-file`) implement the store trait.

pub mod customer;
pub mod error;
pub mod record;
pub mod report;
pub mod repository;
pub mod store;
pub mod vehicle;

pub use error::{Error, Result};
pub use repository::{Repository, SharedRepository};
