//! Injected UI context (spec §5): verbosity and confirmation prompts as an
//! explicit value threaded through commands, rather than a global writer the
//! way the Python implementation's module-level `ui` singleton works — there
//! is no ambient single-threaded execution context to hang a singleton off
//! of in idiomatic Rust, so it becomes a plain struct passed by reference.

use std::io::{self, Write};

use crate::error::OnyoError;

#[derive(Debug, Clone, Copy)]
pub struct Ui {
    pub quiet: bool,
    pub yes: bool,
}

impl Ui {
    pub fn new(quiet: bool, yes: bool) -> Self {
        Self { quiet, yes }
    }

    pub fn print(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("warning: {msg}");
        }
    }

    /// Ask for confirmation before an operation with side effects. Always
    /// `true` in `--yes` mode; never prompts when output is quiet+yes together.
    pub fn confirm(&self, prompt: &str) -> Result<bool, OnyoError> {
        if self.yes {
            return Ok(true);
        }
        print!("{prompt} [y/N] ");
        io::stdout().flush().map_err(|e| OnyoError::UiInputError(e.to_string()))?;
        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|e| OnyoError::UiInputError(e.to_string()))?;
        Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}
