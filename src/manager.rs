use tracing::{info, warn};

use crate::{
    error::AppError,
    profile::Account,
    storage::{Accounts, Store},
    validation::{sanitize_key, validate_account},
};

/// Add, edit, delete and query stored accounts
///
/// Every mutation validates first and writes the whole mapping only once all checks pass.
#[derive(Debug, Clone)]
pub struct AccountManager {
    store: Store,
}

impl AccountManager {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Adds a new account and returns the key it was stored under
    ///
    /// # Errors
    /// * [`AppError::Validation`] - one or more fields are malformed
    /// * [`AppError::DuplicateEmail`] - another account already uses the email
    /// * [`AppError::Io`] / [`AppError::SerdeJson`] - the store could not be written
    pub fn add(&self, account: Account) -> Result<String, AppError> {
        validate_account(&account)?;

        let mut accounts = self.store.load_accounts();
        ensure_unique_email(&accounts, &account.email, None)?;

        let key = unique_key(&accounts, &sanitize_key(&account.name));
        let name = account.name.clone();
        accounts.insert(key.clone(), account);
        self.store.save_accounts(&accounts)?;

        info!(key = %key, name = %name, "account added");
        Ok(key)
    }

    /// Replaces the record stored under `key`; the key itself never changes
    ///
    /// # Errors
    /// * [`AppError::AccountNotFound`] - `key` is not stored
    /// * [`AppError::Validation`] - one or more fields are malformed
    /// * [`AppError::DuplicateEmail`] - a different account already uses the email
    pub fn update(&self, key: &str, account: Account) -> Result<(), AppError> {
        let mut accounts = self.store.load_accounts();
        if !accounts.contains_key(key) {
            return Err(AppError::AccountNotFound(key.to_string()));
        }

        validate_account(&account)?;
        ensure_unique_email(&accounts, &account.email, Some(key))?;

        let name = account.name.clone();
        accounts.insert(key.to_string(), account);
        self.store.save_accounts(&accounts)?;

        info!(key, name = %name, "account updated");
        Ok(())
    }

    /// Deletes the account under `key`, clearing the current-profile marker if it pointed there
    ///
    /// Returns the removed record.
    pub fn delete(&self, key: &str) -> Result<Account, AppError> {
        let mut accounts = self.store.load_accounts();
        let removed = accounts
            .remove(key)
            .ok_or_else(|| AppError::AccountNotFound(key.to_string()))?;
        self.store.save_accounts(&accounts)?;

        if self.store.current_profile().as_deref() == Some(key) {
            if let Err(e) = self.store.remove_current_profile() {
                warn!(key, error = %e, "failed to clear current profile");
            }
        }

        info!(key, name = %removed.name, "account deleted");
        Ok(removed)
    }

    /// Record stored under `key`
    pub fn get(&self, key: &str) -> Option<Account> {
        self.store.load_accounts().remove(key)
    }

    /// Whether `key` is stored
    pub fn exists(&self, key: &str) -> bool {
        self.store.load_accounts().contains_key(key)
    }

    /// Every stored account, ordered by key
    pub fn list(&self) -> Vec<(String, Account)> {
        self.store.load_accounts().into_iter().collect()
    }

    /// Accounts whose name, email or username contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<(String, Account)> {
        let query = query.to_lowercase();
        self.store
            .load_accounts()
            .into_iter()
            .filter(|(_, account)| account.matches(&query))
            .collect()
    }

    /// Key recorded as the current profile
    pub fn current_profile(&self) -> Option<String> {
        self.store.current_profile()
    }
}

/// Exact, case-sensitive email comparison, skipping `editing`
fn ensure_unique_email(
    accounts: &Accounts,
    email: &str,
    editing: Option<&str>,
) -> Result<(), AppError> {
    let taken = accounts
        .iter()
        .any(|(key, existing)| Some(key.as_str()) != editing && existing.email == email);
    if taken {
        Err(AppError::DuplicateEmail(email.to_string()))
    } else {
        Ok(())
    }
}

/// `base`, or `base` followed by the first counter from 1 that is not taken
fn unique_key(accounts: &Accounts, base: &str) -> String {
    if !accounts.contains_key(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !accounts.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}
