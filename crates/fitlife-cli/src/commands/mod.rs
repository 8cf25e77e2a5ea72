pub mod avatar;
pub mod nutrition;
pub mod progress;
pub mod role;
pub mod session;

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Reads a password from stdin when it was not given on the command line.
pub fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
