//! Command-line front ends.
//!
//! [`Shell`] is the interactive prompt: it asks for a dataset, then reads
//! commands one per line until `quit`.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `add` | Prompt for each field and add a contact |
//! | `import` | Import contacts from a `.csv` or `.json` file |
//! | `filter` | Glob search over one field |
//! | `formats` | List available formats and the current one |
//! | `display` | Print contacts, or write them as HTML |
//! | `convert` | Migrate the dataset to another format |
//! | `quit` | Leave the shell |

mod shell;

pub use shell::Shell;
