//! Flat-file backend for the rental store.
//!
//! Each collection lives in its own comma-separated text file, one record per
//! line. Writes append a single line and close the file; reads happen once, at
//! startup.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{FilePaths, FileStore};
