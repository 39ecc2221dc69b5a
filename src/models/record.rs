//! Contact record type.

use super::field::{FIELD_NAMES, Field};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column width of the `"<field>:"` label in the text rendering.
const LABEL_WIDTH: usize = 15;

/// A single contact entry.
///
/// Records are value objects: formats persist and return them, nothing in the
/// storage layer mutates one after construction. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Contact name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Phone number.
    #[serde(rename = "phone number")]
    pub phone_number: String,
}

impl Record {
    /// Creates a record from its three field values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Builds a record from values given in [`FIELD_NAMES`] order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] unless exactly one value per field is given.
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let count = values.len();
        match <[String; 3]>::try_from(values) {
            Ok([name, address, phone_number]) => Ok(Self {
                name,
                address,
                phone_number,
            }),
            Err(_) => Err(Error::InvalidInput(format!(
                "expected {} values ({}), got {count}",
                FIELD_NAMES.len(),
                FIELD_NAMES.join(", ")
            ))),
        }
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::PhoneNumber => &self.phone_number,
        }
    }

    /// Returns the values in [`FIELD_NAMES`] order.
    #[must_use]
    pub fn values(&self) -> [&str; 3] {
        [&self.name, &self.address, &self.phone_number]
    }

    /// Iterates over `(field name, value)` pairs in persisted order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELD_NAMES.into_iter().zip(self.values())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let label = format!("{name}:");
            write!(f, "{label:<LABEL_WIDTH$} {value}")?;
        }
        Ok(())
    }
}
