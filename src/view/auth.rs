//! Admin gate: decides whether upload affordances are exposed.

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use super::error::AuthError;
use crate::config::ClientConfig;

/// Capability check consulted before exposing or performing uploads.
pub trait AdminGate {
    fn is_authorized(&self) -> bool;
}

/// Gate that never authorizes; the public viewer uses this.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicOnly;

impl AdminGate for PublicOnly {
    fn is_authorized(&self) -> bool {
        false
    }
}

/// Single username/password pair with a per-session logged-in flag.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    username: String,
    password: Option<String>,
    authenticated: bool,
}

impl CredentialGate {
    /// A gate with no password can never be logged into.
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
            authenticated: false,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }

    /// Check credentials and open the admin session on success.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let Some(expected) = self.password.as_deref() else {
            warn!("admin login attempted but no password is configured");
            return Err(AuthError::InvalidCredentials);
        };

        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(expected.as_bytes());
        if bool::from(user_ok & pass_ok) {
            self.authenticated = true;
            info!("admin session opened");
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }
}

impl AdminGate for CredentialGate {
    fn is_authorized(&self) -> bool {
        self.authenticated
    }
}
