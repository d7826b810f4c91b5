//! User prompts for the CLI.
//!
//! Responsibilities:
//! - Confirm destructive actions before they are sent.
//! - Read secrets without echoing them.
//!
//! Invariants:
//! - Prompts draw on stderr so stdout stays machine-readable.
//! - A closed stdin counts as "no".

use anyhow::{Context, Result};
use dialoguer::{Confirm, Password};
use secrecy::SecretString;

/// Ask before deleting `item_type` `item_name`. Returns `false` when declined.
pub fn confirm_delete(item_name: &str, item_type: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Are you sure you want to delete {} '{}'?",
            item_type, item_name
        ))
        .default(false)
        .interact_opt()
        .unwrap_or(None)
        .unwrap_or(false);

    if !confirmed {
        eprintln!("Delete cancelled.");
    }
    Ok(confirmed)
}

/// Prompt for a password on the terminal.
pub fn prompt_password(prompt: &str) -> Result<SecretString> {
    let input = Password::new()
        .with_prompt(prompt)
        .interact()
        .context("Failed to read password (pass --password-stdin in scripts)")?;
    Ok(SecretString::new(input.into()))
}

/// Read a password from the first line of stdin.
pub fn read_password_stdin() -> Result<SecretString> {
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("Password read from stdin is empty");
    }
    Ok(SecretString::new(password.to_string().into()))
}
