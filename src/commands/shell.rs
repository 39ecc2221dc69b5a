//! Interactive shell command.

use std::io;

use rolodex::cli::Shell;
use rolodex::config::RolodexConfig;

use super::open_database;

/// Shell command.
///
/// Asks for the dataset on startup unless `--file` or `--format` chose one.
pub fn cmd_shell(
    config: &RolodexConfig,
    prompt_for_dataset: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = io::stdin().lock();
    let output = io::stdout().lock();

    let shell = if prompt_for_dataset {
        Shell::start(input, output)?
    } else {
        Some(Shell::new(open_database(config)?, input, output))
    };

    if let Some(shell) = shell {
        shell.with_html_output(&config.html_output).run()?;
    }
    Ok(())
}
