//! Core command handlers.
//!
//! Contains the one-shot commands that act on the configured dataset.

use std::path::{Path, PathBuf};

use rolodex::config::RolodexConfig;
use rolodex::rendering::{export_html, render_text};
use rolodex::{Database, Field, Record};

use super::open_database;

/// Add command.
pub fn cmd_add(
    config: &RolodexConfig,
    name: String,
    address: String,
    phone: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let record = Record::new(name, address, phone);
    db.add(&record)?;

    println!("The following record:");
    println!("{record}");
    println!("has been added to {}", db.data_file().display());
    Ok(())
}

/// Import command.
pub fn cmd_import(config: &RolodexConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let count = db.import_records(path)?;
    println!("Imported {count} records from {}", path.display());
    Ok(())
}

/// Filter command.
pub fn cmd_filter(
    config: &RolodexConfig,
    field: &str,
    pattern: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let field: Field = field.parse()?;
    let db = open_database(config)?;
    let matches = db.filter(field, pattern)?;

    if matches.is_empty() {
        println!("No records match {field} = {pattern}");
        return Ok(());
    }

    println!("Results:");
    println!("{}", render_text(&matches));
    Ok(())
}

/// Formats command.
pub fn cmd_formats(config: &RolodexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(&config.data_file, &config.default_format)?;
    let (registry, current) = db.formats();
    let stored = db.stored_formats();

    println!("Available formats:");
    for name in registry.names() {
        let mut notes = Vec::new();
        if name == current {
            notes.push("configured");
        }
        if stored.contains(&name) {
            notes.push("has data");
        }
        if notes.is_empty() {
            println!("  - {name}");
        } else {
            println!("  - {name} ({})", notes.join(", "));
        }
    }
    Ok(())
}

/// Display command.
pub fn cmd_display(
    config: &RolodexConfig,
    html: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let records = db.records()?;

    if html {
        let path = output.unwrap_or_else(|| config.html_output.clone());
        export_html(&records, &path)?;
        println!("Wrote {} records to {}", records.len(), path.display());
    } else if records.is_empty() {
        println!("No records in {}", db.data_file().display());
    } else {
        println!("{}", render_text(&records));
    }
    Ok(())
}

/// Convert command.
pub fn cmd_convert(config: &RolodexConfig, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = open_database(config)?;
    let format = format.trim().to_lowercase();
    let previous = db.current_format();
    let old_file = db.data_file();
    let had_data = old_file.is_file();

    db.convert(&format)?;

    if previous == db.current_format() {
        println!("Database is already stored as {format}");
        return Ok(());
    }

    if !had_data {
        println!("Switched {previous} to {format}; there was no data to convert");
    } else {
        println!(
            "Converted {} to {}; {} has been removed",
            old_file.display(),
            db.data_file().display(),
            old_file.display()
        );
    }
    println!("Pass --format {format} or set default_format = \"{format}\" to keep using it");
    Ok(())
}

/// Clean command.
pub fn cmd_clean(config: &RolodexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let path = db.data_file();
    db.clean()?;
    println!("Removed {}", path.display());
    Ok(())
}
