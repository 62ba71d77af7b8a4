//! Interactive flow for the copy command.
//!
//! Collects destination, credentials, and confirmation through terminal
//! prompts. Uses dialoguer for the prompts; values prefilled from CLI args
//! skip them.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use envcopy_core::types::{CopyTarget, Credentials};

/// Pre-filled values from CLI args that skip prompts.
#[derive(Debug, Clone, Default)]
pub struct PrefilledInput {
    /// Destination - if Some, skip the selection prompt
    pub target: Option<CopyTarget>,
    /// Credentials - if Some, used once in place of the credential prompts
    pub credentials: Option<Credentials>,
    /// Skip all confirmations
    pub yes: bool,
}

/// Terminal prompts for driving the copy dialog.
pub struct DialogFlow<W: Write = io::Stdout> {
    /// Pre-filled input from CLI args
    prefilled: PrefilledInput,
    /// Output writer (for testing)
    writer: W,
    /// Theme for dialoguer prompts
    theme: ColorfulTheme,
}

impl DialogFlow<io::Stdout> {
    /// Create a new flow writing to stdout.
    pub fn new(prefilled: PrefilledInput) -> Self {
        Self {
            prefilled,
            writer: io::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl<W: Write> DialogFlow<W> {
    /// Create a new flow with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(prefilled: PrefilledInput, writer: W) -> Self {
        Self {
            prefilled,
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    /// Pick the destination from the loaded catalog. `None` means the
    /// operator cancelled the selection.
    pub fn prompt_target(&mut self, catalog: &[String]) -> Result<Option<CopyTarget>> {
        if let Some(target) = self.prefilled.target.take() {
            if let CopyTarget::Environment(id) = &target
                && !catalog.iter().any(|e| e == id)
            {
                anyhow::bail!(
                    "Environment '{}' is not a candidate destination (available: {})",
                    id,
                    catalog.join(", ")
                );
            }
            return Ok(Some(target));
        }

        let mut items: Vec<&str> = catalog.iter().map(String::as_str).collect();
        items.push("All environments");

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Copy destination")
            .items(&items)
            .default(0)
            .interact_opt()?;

        Ok(selection.map(|index| {
            if index == catalog.len() {
                CopyTarget::AllEnvironments
            } else {
                CopyTarget::Environment(catalog[index].clone())
            }
        }))
    }

    /// Collect Basic-auth credentials. Prefilled values are consumed once;
    /// later calls (empty input, retry after 401) prompt interactively.
    pub fn prompt_credentials(&mut self) -> Result<Credentials> {
        if let Some(credentials) = self.prefilled.credentials.take() {
            return Ok(credentials);
        }

        let username: String = Input::with_theme(&self.theme)
            .with_prompt("Username")
            .interact_text()?;
        let password = Password::with_theme(&self.theme)
            .with_prompt("Password")
            .interact()?;

        Ok(Credentials::new(username, password))
    }

    /// Show the copy summary and ask for confirmation.
    pub fn confirm(&mut self, entry_id: &str, target: &CopyTarget) -> Result<bool> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  Copy summary").bold())?;
        writeln!(self.writer, "  ───────────────────────────")?;
        writeln!(self.writer, "  Entry:       {}", style(entry_id).green())?;
        writeln!(
            self.writer,
            "  Destination: {}",
            style(target.label()).green()
        )?;
        writeln!(self.writer)?;

        if self.prefilled.yes {
            return Ok(true);
        }

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Copy entry to {}?", target.label()))
            .default(true)
            .interact()?;

        Ok(confirmed)
    }

    /// Ask whether to retry after a failed copy.
    pub fn retry(&mut self) -> Result<bool> {
        if self.prefilled.yes {
            // A scripted run must not loop on a persistent failure.
            return Ok(false);
        }

        let retry = Confirm::with_theme(&self.theme)
            .with_prompt("Copy failed. Try again?")
            .default(false)
            .interact()?;

        Ok(retry)
    }
}
