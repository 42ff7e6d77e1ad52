use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};

/// Prompt the user for their username on the terminal.
///
/// Fails when stdin is not an interactive terminal, so a missing `-u` flag
/// in a script aborts instead of hanging on a prompt nobody will answer.
pub fn ask_username() -> Result<String> {
    if !io::stdin().is_terminal() {
        bail!("no username provided and stdin is not a terminal");
    }

    eprint!("Enter username: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let username = line.trim().to_string();
    if username.is_empty() {
        bail!("username cannot be empty");
    }

    Ok(username)
}

/// Prompt the user for their password securely.
/// Input is hidden and not echoed to the terminal.
pub fn ask_password() -> Result<String> {
    if !io::stdin().is_terminal() {
        bail!("no password provided and stdin is not a terminal");
    }

    eprint!("Enter password: ");
    io::stderr().flush()?;

    Ok(rpassword::read_password()?)
}
