//! On-disk record formats.
//!
//! Provides the serialization strategies a [`crate::Database`] persists its
//! records through.
//!
//! # Architecture
//!
//! - **Format adapters** implement the [`Format`] trait: append one record to
//!   a file, read every record back
//! - **Registry** ([`FormatRegistry`]) maps format names to adapters; a format
//!   name doubles as the data file extension
//!
//! # Supported Formats
//!
//! | Format | Extension | Layout | Write cost |
//! |--------|-----------|--------|------------|
//! | CSV | `.csv` | Header row, then one row per record | Append |
//! | JSON | `.json` | `{"records": [...]}`, pretty-printed | Full rewrite |
//!
//! # Examples
//!
//! ```rust,no_run
//! use rolodex::{FormatRegistry, Record};
//! use std::path::Path;
//!
//! # fn main() -> rolodex::Result<()> {
//! let registry = FormatRegistry::builtin();
//! let csv = registry.get("csv")?;
//! csv.write(&Record::new("Ada", "1 Loop Rd", "555-0100"), Path::new("people.csv"))?;
//! assert_eq!(csv.read_all(Path::new("people.csv"))?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod formats;
pub mod traits;

// Re-exports for convenience
pub use formats::{CsvFormat, FormatRegistry, JsonFormat};
pub use traits::Format;
