use crate::domain::UserId;
use crate::ports::account_directory::{AccountDirectory as AccountDirectoryTrait, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock implementation of AccountDirectory
///
/// Accounts live in the authentication service, which is outside this crate.
/// In strict mode only registered ids exist; permissive mode accepts any id.
pub struct AccountDirectory {
    known_accounts: Mutex<HashSet<UserId>>,
    permissive: bool,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self {
            known_accounts: Mutex::new(HashSet::new()),
            permissive: false,
        }
    }

    /// Accept every account id
    pub fn permissive() -> Self {
        Self {
            known_accounts: Mutex::new(HashSet::new()),
            permissive: true,
        }
    }

    /// Register an account for testing purposes
    pub fn add_account(&self, user_id: UserId) {
        self.known_accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(user_id);
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectoryTrait for AccountDirectory {
    /// Check if the account is registered (always true in permissive mode)
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        if self.permissive {
            return Ok(true);
        }
        let accounts = self
            .known_accounts
            .lock()
            .map_err(|_| "account directory lock poisoned")?;
        Ok(accounts.contains(&user_id))
    }
}
