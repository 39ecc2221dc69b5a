//! Command handlers module.
//!
//! - `core.rs`: one-shot dataset commands (add, import, filter, formats,
//!   display, convert, clean)
//! - `shell.rs`: the interactive shell

mod core;
mod shell;

pub use core::{cmd_add, cmd_clean, cmd_convert, cmd_display, cmd_filter, cmd_formats, cmd_import};
pub use shell::cmd_shell;

use rolodex::{Database, RolodexConfig};

/// Opens the configured dataset.
///
/// Fails when the configured format has no data file but another format
/// does, so a command never starts a second dataset beside a converted one.
fn open_database(config: &RolodexConfig) -> Result<Database, Box<dyn std::error::Error>> {
    let db = Database::new(&config.data_file, &config.default_format)?;
    if db.data_file().is_file() {
        return Ok(db);
    }

    match db.stored_formats().first() {
        Some(stored) => Err(format!(
            "no {} data file at {}, the dataset is stored as {stored}; \
             pass --format {stored} or set default_format = \"{stored}\"",
            db.current_format(),
            db.data_file().display()
        )
        .into()),
        None => Ok(db),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex::Record;
    use tempfile::TempDir;

    fn config(dir: &TempDir, format: &str) -> RolodexConfig {
        RolodexConfig::new()
            .with_data_file(dir.path().join("contacts"))
            .with_default_format(format)
    }

    #[test]
    fn test_open_database_fresh_dataset() {
        let dir = TempDir::new().unwrap();
        let db = open_database(&config(&dir, "csv")).unwrap();
        assert_eq!(db.current_format(), "csv");
    }

    #[test]
    fn test_open_database_refuses_stale_format() {
        let dir = TempDir::new().unwrap();
        let mut db = open_database(&config(&dir, "csv")).unwrap();
        db.add(&Record::new("John Doe", "123 Street street", "555-5555"))
            .unwrap();
        db.convert("json").unwrap();

        let err = open_database(&config(&dir, "csv")).unwrap_err();
        assert!(err.to_string().contains("--format json"));
        assert!(!dir.path().join("contacts.csv").exists());

        let db = open_database(&config(&dir, "json")).unwrap();
        assert_eq!(db.records().unwrap().len(), 1);
    }
}
