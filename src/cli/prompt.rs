//! Interactive confirmation for destructive commands

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::error::{VyapaarError, VyapaarResult};

/// Ask before an irreversible action; `assume_yes` skips the prompt
pub fn confirm(prompt: &str, assume_yes: bool) -> VyapaarResult<bool> {
    if assume_yes {
        return Ok(true);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| {
            VyapaarError::Io(format!(
                "Could not read confirmation ({}); pass --yes to skip the prompt",
                e
            ))
        })
}
