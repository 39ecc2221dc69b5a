//! Interactive line-oriented shell.
//!
//! Reads commands from any [`BufRead`] and writes prompts and results to any
//! [`Write`], so the same loop drives a terminal or a scripted session.

use crate::models::{FIELD_NAMES, Field, Record};
use crate::rendering::{DEFAULT_HTML_OUTPUT, export_html, render_text};
use crate::storage::Database;
use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Help text listing shell commands.
const HELP: &str = "\
Commands:
  add      add a new contact
  import   import contacts from a .csv or .json file
  filter   search one field with a glob pattern (*, ?, [...])
  formats  list storage formats
  display  show all contacts as text or write them as HTML
  convert  migrate the database to another format
  help     show this list
  quit     leave the shell";

/// Interactive shell over a [`Database`].
pub struct Shell<R, W> {
    database: Database,
    input: R,
    output: W,
    html_output: PathBuf,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell over an open database.
    pub fn new(database: Database, input: R, output: W) -> Self {
        Self {
            database,
            input,
            output,
            html_output: PathBuf::from(DEFAULT_HTML_OUTPUT),
        }
    }

    /// Asks for the dataset name and format, then creates the shell.
    ///
    /// Unsupported formats are reported and asked for again. Returns `None`
    /// if the input ends first.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing prompts fails.
    pub fn start(mut input: R, mut output: W) -> Result<Option<Self>> {
        emit(&mut output, "Welcome! Please specify the file name:")?;
        let Some(file_name) = prompt_line(&mut input, &mut output, "> ")? else {
            return Ok(None);
        };

        loop {
            emit(
                &mut output,
                "Please specify the file type (currently supported formats: csv and json):",
            )?;
            let Some(format) = prompt_line(&mut input, &mut output, "> ")? else {
                return Ok(None);
            };

            match Database::new(&file_name, &format.to_lowercase()) {
                Ok(database) => {
                    emit(&mut output, "Database Initialized.")?;
                    if let Some(stored) = stored_elsewhere(&database) {
                        emit(
                            &mut output,
                            &format!(
                                "Note: no {} file yet, this dataset is stored as {stored}.",
                                database.current_format()
                            ),
                        )?;
                    }
                    return Ok(Some(Self::new(database, input, output)));
                },
                Err(e) => emit(&mut output, &format!("ERROR: {e}"))?,
            }
        }
    }

    /// Sets where the `display` command writes HTML.
    #[must_use]
    pub fn with_html_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.html_output = path.into();
        self
    }

    /// Returns the database the shell drives.
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Consumes the shell, returning its database.
    pub fn into_database(self) -> Database {
        self.database
    }

    /// Reads and runs commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails; database errors are
    /// reported to the user and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        self.say("Please enter a command, type 'help' for list of commands:")?;
        loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(());
            };
            if !self.process_command(&line)? {
                return Ok(());
            }
        }
    }

    /// Runs a single command. Returns `false` when the shell should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn process_command(&mut self, command: &str) -> Result<bool> {
        let command = command.trim().to_lowercase();
        match command.as_str() {
            "" => Ok(true),
            "help" => self.say(HELP).map(|()| true),
            "add" => self.cmd_add(),
            "import" => self.cmd_import(),
            "filter" => self.cmd_filter(),
            "formats" => self.cmd_formats().map(|()| true),
            "display" => self.cmd_display(),
            "convert" => self.cmd_convert(),
            "quit" | "exit" => {
                self.say("Have a nice day!")?;
                Ok(false)
            },
            other => {
                self.say(&format!(
                    "'{other}' is an invalid command, type 'help' for valid commands."
                ))?;
                Ok(true)
            },
        }
    }

    fn cmd_add(&mut self) -> Result<bool> {
        let mut values = Vec::with_capacity(FIELD_NAMES.len());
        for field in FIELD_NAMES {
            let Some(value) = self.prompt(&format!("Please enter {field}: "))? else {
                return Ok(false);
            };
            values.push(value);
        }

        let record = Record::from_values(values)?;
        match self.database.add(&record) {
            Ok(()) => self.say(&format!(
                "\nThe following record:\n{record}\nhas been added to the database!"
            ))?,
            Err(e) => self.say(&format!(
                "ERROR: Failed to add new record to the database: {e}"
            ))?,
        }
        Ok(true)
    }

    fn cmd_import(&mut self) -> Result<bool> {
        let Some(path) = self.prompt("File name?\n>> ")? else {
            return Ok(false);
        };

        match self.database.import_records(Path::new(&path)) {
            Ok(count) => self.say(&format!(
                "{count} records from {path} have been added to the database"
            ))?,
            Err(e) => self.say(&format!("Unable to import records from {path}: {e}"))?,
        }
        Ok(true)
    }

    fn cmd_filter(&mut self) -> Result<bool> {
        let options = FIELD_NAMES.join(", ");
        let Some(selected) =
            self.prompt(&format!("What are you searching for? Options: {options}\n>> "))?
        else {
            return Ok(false);
        };

        let Some(field) = Field::parse(&selected) else {
            self.say(&format!("{selected}s are not recorded at this time"))?;
            return Ok(true);
        };

        let Some(pattern) = self.prompt(&format!("Enter {field} to be found\n>>> "))? else {
            return Ok(false);
        };

        match self.database.filter(field, &pattern) {
            Ok(records) => {
                self.say("Results:")?;
                self.print_records(&records)?;
            },
            Err(e) => self.say(&format!("ERROR: Failed to read the database: {e}"))?,
        }
        Ok(true)
    }

    fn cmd_formats(&mut self) -> Result<()> {
        let (registry, current) = self.database.formats();
        let listing = format!(
            "Available formats: {}\nCurrent format: {current}",
            registry.names().join(", ")
        );
        self.say(&listing)
    }

    fn cmd_display(&mut self) -> Result<bool> {
        let Some(choice) = self.prompt("Format? Options: text, html\n>> ")? else {
            return Ok(false);
        };

        let records = match self.database.records() {
            Ok(records) => records,
            Err(e) => {
                self.say(&format!("ERROR: Failed to read the database: {e}"))?;
                return Ok(true);
            },
        };

        match choice.to_lowercase().as_str() {
            "text" => self.print_records(&records)?,
            "html" => match export_html(&records, &self.html_output) {
                Ok(()) => self.say(&format!(
                    "html file created at {}!",
                    self.html_output.display()
                ))?,
                Err(e) => self.say(&format!("ERROR: {e}"))?,
            },
            other => self.say(&format!("{other} is not available at this time"))?,
        }
        Ok(true)
    }

    fn cmd_convert(&mut self) -> Result<bool> {
        self.say("Choose new format")?;
        self.cmd_formats()?;
        let Some(format) = self.prompt(">> ")? else {
            return Ok(false);
        };
        let format = format.to_lowercase();

        if !self.database.formats().0.contains(&format) {
            self.say(&format!("{format} is not available at this time"))?;
            return Ok(true);
        }

        match self.database.convert(&format) {
            Ok(()) => self.say(&format!("Database has been converted to {format}!"))?,
            Err(e) => self.say(&format!(
                "ERROR: Failed to convert database to {format}: {e}"
            ))?,
        }
        Ok(true)
    }

    fn print_records(&mut self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return self.say("(no records)");
        }
        self.say(&format!("{}\n", render_text(records)))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        emit(&mut self.output, message)
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        prompt_line(&mut self.input, &mut self.output, prompt)
    }
}

/// Another format holding this dataset's data, when the current one has none.
fn stored_elsewhere(database: &Database) -> Option<&'static str> {
    if database.data_file().is_file() {
        return None;
    }
    database.stored_formats().first().copied()
}

/// Writes one line of output.
fn emit<W: Write>(output: &mut W, message: &str) -> Result<()> {
    writeln!(output, "{message}").map_err(console_error)
}

/// Writes a prompt and reads the trimmed answer; `None` at end of input.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}").map_err(console_error)?;
    output.flush().map_err(console_error)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(console_error)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[allow(clippy::needless_pass_by_value)]
fn console_error(e: std::io::Error) -> Error {
    Error::OperationFailed {
        operation: "console_io".to_string(),
        cause: e.to_string(),
    }
}
