//! Format adapters and their registry.
//!
//! Each adapter implements the [`Format`] trait.

pub mod csv;
pub mod json;

pub use self::csv::CsvFormat;
pub use self::json::JsonFormat;

use super::traits::Format;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Maps format names to format adapters.
///
/// A [`crate::Database`] builds its registry once at construction and looks
/// every format up by name through it.
pub struct FormatRegistry {
    formats: BTreeMap<&'static str, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Creates a registry with no formats.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            formats: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the built-in CSV and JSON formats.
    ///
    /// New storage formats get added here.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(CsvFormat::new()));
        registry.register(Box::new(JsonFormat::new()));
        registry
    }

    /// Registers a format under its name, replacing any previous entry.
    pub fn register(&mut self, format: Box<dyn Format>) {
        self.formats.insert(format.name(), format);
    }

    /// Looks up a format by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if no format has that name.
    pub fn get(&self, name: &str) -> Result<&dyn Format> {
        self.formats
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::UnsupportedFormat(name.to_string()))
    }

    /// Detects the format of a file from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the path has no extension or the
    /// extension names no registered format.
    pub fn for_path(&self, path: &Path) -> Result<&dyn Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some(ext) => self.get(ext),
            None => Err(Error::UnsupportedFormat(format!(
                "cannot determine format: {} has no extension",
                path.display()
            ))),
        }
    }

    /// Returns whether a format with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Returns the registered format names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.formats.keys().copied().collect()
    }

    /// Iterates over the registered formats in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Format> {
        self.formats.values().map(AsRef::as_ref)
    }

    /// Returns the number of registered formats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Returns whether no formats are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.formats.keys()).finish()
    }
}

/// Maps a filesystem error to an operation failure naming the file.
pub(crate) fn io_error(operation: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{}: {e}", path.display()),
    }
}
