//! Data models for rolodex.
//!
//! A contact is a fixed-shape [`Record`]; [`Field`] names its columns and
//! [`FIELD_NAMES`] is the single ordered list every format and renderer uses.

mod field;
mod record;

pub use field::{FIELD_NAMES, Field};
pub use record::Record;
