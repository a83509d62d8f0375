// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Interactive confirmation of a generated message.

use crate::error::{CmgError, Result};

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Editor};

/// Outcome of the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// The generated message was accepted as-is.
    Accepted(String),
    /// The user rewrote the message in an editor.
    Edited(String),
    /// The user declined and left the editor empty.
    Aborted,
}

impl Confirmation {
    /// The message to commit, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Confirmation::Accepted(m) | Confirmation::Edited(m) => Some(m),
            Confirmation::Aborted => None,
        }
    }
}

/// Show the message and ask whether to use it; open an editor on decline.
pub fn confirm_message(message: &str) -> Result<Confirmation> {
    let term = Term::stderr();
    let theme = ColorfulTheme::default();

    term.write_line(&format!("\n{}", style("Commit message:").bold()))?;
    term.write_line("")?;
    for line in message.lines() {
        term.write_line(&format!("  {}", style(line).green()))?;
    }
    term.write_line("")?;

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt("Do you want to use this message?")
        .default(true)
        .interact()?;

    if confirmed {
        return Ok(Confirmation::Accepted(message.to_string()));
    }

    let edited = Editor::new()
        .edit(message)
        .map_err(|e| CmgError::Ui(e.to_string()))?;

    Ok(from_editor(edited))
}

/// An editor closed without saving, or saved empty, aborts the commit.
fn from_editor(edited: Option<String>) -> Confirmation {
    match edited.map(|m| m.trim().to_string()) {
        Some(m) if !m.is_empty() => Confirmation::Edited(m),
        _ => Confirmation::Aborted,
    }
}
