//! # Terminal Configuration & Identity
//!
//! Static configuration for a terminal plus the identity-provider boundary.
//! The engine never authenticates; it consumes the current user id from the
//! collaborator at checkout/return time.

use serde::{Deserialize, Serialize};

/// Static configuration for one terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Branch code used in transaction ids (e.g. "B001").
    pub branch_id: String,

    /// Terminal identifier within the branch (e.g. "POS-01").
    pub terminal_id: String,
}

impl TerminalConfig {
    /// Creates a terminal configuration.
    pub fn new(branch_id: impl Into<String>, terminal_id: impl Into<String>) -> Self {
        TerminalConfig {
            branch_id: branch_id.into(),
            terminal_id: terminal_id.into(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig::new("B001", "POS-01")
    }
}

/// Supplies the `processed_by` user id stamped on sale and return records.
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in cashier.
    fn current_user(&self) -> String;
}

/// Identity provider with a fixed user, for tests and single-user setups.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    /// Creates a provider that always reports `user_id`.
    pub fn new(user_id: impl Into<String>) -> Self {
        StaticIdentity {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> String {
        self.user_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        let identity = StaticIdentity::new("USER1");
        assert_eq!(identity.current_user(), "USER1");
    }

    #[test]
    fn test_default_config() {
        let config = TerminalConfig::default();
        assert_eq!(config.branch_id, "B001");
    }
}
