//! Credentials and session handling.
//!
//! The core never prompts for anything. Callers hand it a
//! [`CredentialSource`] (environment variables, a secrets store, or the
//! CLI's interactive prompt) and receive a [`Session`] from
//! [`ControllerClient::login`](crate::controller::ControllerClient::login).

use anyhow::{Context, Result};
use serde::Serialize;

/// Environment variable holding the login username.
pub const ENV_USERNAME: &str = "ROUTEWATCH_USERNAME";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "ROUTEWATCH_PASSWORD";

/// Username/password pair sent to the controller's login endpoint.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where login credentials come from.
pub trait CredentialSource {
    fn credentials(&self) -> Result<Credentials>;
}

/// Reads credentials from `ROUTEWATCH_USERNAME` / `ROUTEWATCH_PASSWORD`.
pub struct EnvCredentialSource;

impl CredentialSource for EnvCredentialSource {
    fn credentials(&self) -> Result<Credentials> {
        let username = std::env::var(ENV_USERNAME)
            .with_context(|| format!("{ENV_USERNAME} is not set"))?;
        let password = std::env::var(ENV_PASSWORD)
            .with_context(|| format!("{ENV_PASSWORD} is not set"))?;
        Ok(Credentials { username, password })
    }
}

/// Opaque bearer credential returned by the controller's login endpoint.
///
/// The token is never inspected or decoded, only attached to subsequent
/// requests. It is not persisted and is useless after the process exits.
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub(crate) fn new(token: String) -> Self {
        Self { token }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));

        let session = Session::new("eyJhbGciOi".to_string());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("eyJhbGciOi"));
    }
}
