//! Admin authentication
//!
//! Accounts are provisioned out-of-band and read-only to this core:
//!
//! ```bash
//! # Comma-separated email:password[:role] triples
//! ANALYTICS_ADMINS=alice@example.com:correct-horse:admin,bob@example.com:hunter22
//! ```
//!
//! Passwords are bcrypt-hashed at startup and verified with the same slow,
//! salted comparison on login. Session tokens are opaque random values;
//! only their digest ever reaches the session store (see `token`).

pub mod guard;
pub mod rate_limit;
pub mod token;

use std::collections::HashMap;

use bcrypt::{hash, verify, DEFAULT_COST};
use uuid::Uuid;

/// Namespace for deriving stable admin ids from emails, so sessions stay
/// valid across restarts.
const ADMIN_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f5d_e1a4_8c3b_4b7e_9a02_d41c_77e5_21b9);

/// An admin account (principal).
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    InvalidCredentials,
    HashError(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::HashError(msg) => write!(f, "Hash error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Directory of admin accounts keyed by email.
pub struct AdminDirectory {
    accounts: HashMap<String, AdminAccount>,
}

impl AdminDirectory {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Build the directory from the `ANALYTICS_ADMINS` environment variable.
    ///
    /// Falls back to a default `admin@example.com:admin` account when no
    /// admins are configured (development only, logged loudly).
    pub fn from_env() -> Result<Self, AuthError> {
        let mut directory = Self::new();

        if let Ok(admins) = std::env::var("ANALYTICS_ADMINS") {
            for entry in admins.split(',') {
                let parts: Vec<&str> = entry.trim().split(':').collect();
                if parts.len() >= 2 {
                    let email = parts[0];
                    let password = parts[1];
                    let role = if parts.len() > 2 { parts[2] } else { "admin" };

                    if let Err(e) = directory.add_admin(email, password, role) {
                        log::error!("failed to add admin {}: {}", email, e);
                    }
                }
            }
        }

        if directory.accounts.is_empty() {
            log::warn!("no admins configured, adding default admin@example.com:admin");
            directory.add_admin("admin@example.com", "admin", "admin")?;
        }

        log::info!("loaded {} admin accounts", directory.accounts.len());
        Ok(directory)
    }

    /// Add an account, bcrypt-hashing the password.
    pub fn add_admin(&mut self, email: &str, password: &str, role: &str) -> Result<(), AuthError> {
        let password_hash =
            hash(password, DEFAULT_COST).map_err(|e| AuthError::HashError(e.to_string()))?;

        self.accounts.insert(
            email.to_string(),
            AdminAccount {
                id: Uuid::new_v5(&ADMIN_ID_NAMESPACE, email.as_bytes()),
                email: email.to_string(),
                password_hash,
                role: role.to_string(),
            },
        );

        Ok(())
    }

    /// Verify credentials with the slow salted comparison.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&AdminAccount, AuthError> {
        let account = self
            .accounts
            .get(email)
            .ok_or(AuthError::InvalidCredentials)?;

        if verify(password, &account.password_hash).unwrap_or(false) {
            Ok(account)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn by_id(&self, id: Uuid) -> Option<&AdminAccount> {
        self.accounts.values().find(|account| account.id == id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AdminDirectory {
    fn default() -> Self {
        Self::new()
    }
}
