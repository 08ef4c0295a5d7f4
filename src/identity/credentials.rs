//! Pluggable credential verification for login.

use crate::catalog::model::User;

/// Verifies a login attempt for an already-resolved user record.
/// The login resolver only learns pass/fail, so implementations cannot
/// leak which part of a credential check failed.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, user: &User, password: &str) -> bool;
}

/// Accepts one process-wide shared password for every user.
/// A per-user verifier can replace this without touching the resolver.
pub struct SharedSecretCredentials {
    secret: String,
}

impl SharedSecretCredentials {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl CredentialCheck for SharedSecretCredentials {
    fn verify(&self, _user: &User, password: &str) -> bool {
        password == self.secret
    }
}
