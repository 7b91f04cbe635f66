//! Credential verification
//!
//! The playground's mocked login backend: a fixed set of accounts checked
//! in memory. The core treats it as an opaque service behind the
//! [`CredentialGateway`](crate::gateway::CredentialGateway); nothing here
//! persists beyond the process.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::SubmitError;

/// Identity returned on a successful credential check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
}

/// In-memory username/password verifier
#[derive(Debug, Clone, Default)]
pub struct CredentialVerifier {
    accounts: HashMap<String, String>,
}

impl CredentialVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The playground's documented demo account (admin / test)
    pub fn demo() -> Self {
        Self::new().with_account("admin", "test")
    }

    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.accounts
            .insert(username.to_string(), password.to_string());
        self
    }

    /// Check a credential pair, returning the typed identity on success.
    ///
    /// Unknown users and wrong passwords are indistinguishable from the
    /// caller's side.
    pub fn verify(&self, username: &str, password: &str) -> Result<User, SubmitError> {
        match self.accounts.get(username) {
            Some(expected) if expected == password => Ok(User {
                username: username.to_string(),
                display_name: username.to_string(),
            }),
            _ => Err(SubmitError::InvalidCredentials),
        }
    }
}
