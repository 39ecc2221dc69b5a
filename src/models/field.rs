//! Record field names.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Field names of a contact record, in persisted order.
///
/// This is the CSV header row and the key order of JSON record objects.
pub const FIELD_NAMES: [&str; 3] = ["name", "address", "phone number"];

/// A field of a contact record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Contact name.
    Name,
    /// Postal address.
    Address,
    /// Phone number.
    PhoneNumber,
}

impl Field {
    /// Returns all fields in persisted order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Name, Self::Address, Self::PhoneNumber]
    }

    /// Returns the position of this field in [`FIELD_NAMES`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Address => 1,
            Self::PhoneNumber => 2,
        }
    }

    /// Returns the persisted field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        FIELD_NAMES[self.index()]
    }

    /// Parses a field name.
    ///
    /// Returns `None` if the name is not recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            "phone number" | "phone_number" | "phone-number" | "phone" => Some(Self::PhoneNumber),
            _ => None,
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "unknown field '{s}', expected one of: {}",
                FIELD_NAMES.join(", ")
            ))
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_matches_names() {
        let names: Vec<&str> = Field::all().iter().map(|f| f.as_str()).collect();
        assert_eq!(names, FIELD_NAMES);
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(Field::parse("name"), Some(Field::Name));
        assert_eq!(Field::parse("ADDRESS"), Some(Field::Address));
        assert_eq!(Field::parse("phone number"), Some(Field::PhoneNumber));
        assert_eq!(Field::parse(" phone_number "), Some(Field::PhoneNumber));
        assert_eq!(Field::parse("email"), None);
    }

    #[test]
    fn test_field_from_str_error() {
        let err = "email".parse::<Field>().unwrap_err();
        assert!(err.to_string().contains("email"));
        assert!(err.to_string().contains("phone number"));
    }
}
