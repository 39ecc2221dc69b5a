//! # Rolodex
//!
//! A personal contact store with interchangeable on-disk formats.
//!
//! Contacts are fixed-shape [`Record`]s persisted through a pluggable
//! [`Format`] (CSV and JSON ship built in). The [`Database`] facade binds a
//! dataset base name to its current format and mediates every read, write,
//! import, conversion and filter.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rolodex::{Database, Field, Record};
//!
//! # fn main() -> rolodex::Result<()> {
//! let mut db = Database::new("contacts", "csv")?;
//! db.add(&Record::new("John Doe", "123 Street street", "555-5555"))?;
//!
//! // Verified migration: the JSON file is read back before the CSV one goes.
//! db.convert("json")?;
//!
//! let matches = db.filter(Field::Name, "John*")?;
//! assert_eq!(matches.len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod storage;

// Re-exports for convenience
pub use config::RolodexConfig;
pub use io::{CsvFormat, Format, FormatRegistry, JsonFormat};
pub use models::{FIELD_NAMES, Field, Record};
pub use storage::{Database, Records};

/// Error type for rolodex operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed CSV rows or JSON documents, unknown field names |
/// | `UnsupportedFormat` | A format name is not in the registry |
/// | `OperationFailed` | Filesystem I/O, (de)serialization, config or logging setup fails |
/// | `VerificationMismatch` | A converted file does not read back as the source records |
/// | `PartialImport` | An import write failed after some records were committed |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A CSV row does not carry exactly one value per field
    /// - A JSON data file is not a single-key object holding a record array
    /// - A field name is not one of the fixed record fields
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested format is not registered.
    ///
    /// Raised by database construction, import (source extension) and
    /// conversion (target format).
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur (open, read, write, remove)
    /// - CSV or JSON (de)serialization fails
    /// - Configuration files cannot be read or parsed
    /// - Logging initialization fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A format conversion did not read back what was written.
    ///
    /// The partially converted file has already been removed when this is
    /// returned; the existing data file is untouched.
    #[error(
        "conversion to '{format}' failed verification: wrote {expected} records, read back {found}"
    )]
    VerificationMismatch {
        /// The target format of the conversion.
        format: String,
        /// Number of records read from the source file.
        expected: usize,
        /// Number of records read back from the converted file.
        found: usize,
    },

    /// An import stopped part way through.
    ///
    /// Records written before the failure remain in the data file.
    #[error("import stopped after {imported} records: {cause}")]
    PartialImport {
        /// Number of records committed before the failure.
        imported: usize,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for rolodex operations.
pub type Result<T> = std::result::Result<T, Error>;
