//! Credential acquisition for the CLI.
//!
//! Priority: `--username` flag / environment variables, then an
//! interactive prompt. The core library never prompts; this module is the
//! CLI's [`CredentialSource`].

use anyhow::{Context, Result};
use routewatch_core::auth::{self, CredentialSource, Credentials};
use std::io::{BufRead, Write};

/// Acquires credentials from the CLI flag, the environment, or the
/// terminal, in that order.
pub struct CliCredentialSource {
    pub username_flag: Option<String>,
}

impl CredentialSource for CliCredentialSource {
    fn credentials(&self) -> Result<Credentials> {
        let username = match &self.username_flag {
            Some(u) => u.clone(),
            None => match std::env::var(auth::ENV_USERNAME) {
                Ok(u) if !u.is_empty() => u,
                _ => prompt_line("Enter your username: ")?,
            },
        };

        let password = match std::env::var(auth::ENV_PASSWORD) {
            Ok(p) if !p.is_empty() => p,
            _ => rpassword::prompt_password("Enter your password: ")
                .context("Failed to read password")?,
        };

        Ok(Credentials { username, password })
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read username")?;
    Ok(line.trim().to_string())
}
