//! Dataset storage.
//!
//! [`Database`] binds a dataset base name to a current format and routes
//! every read and write through the format registry.

mod database;
mod filter;

pub use database::{Database, Records};
pub use filter::GlobFilter;
