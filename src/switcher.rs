use tracing::{info, warn};

use crate::{error::AppError, git::GitBridge, profile::Account, storage::Store};

/// Keeps the current-profile marker in line with the live global Git identity
#[derive(Debug)]
pub struct ProfileSwitcher<G> {
    store: Store,
    git: G,
}

impl<G: GitBridge> ProfileSwitcher<G> {
    pub fn new(store: Store, git: G) -> Self {
        Self { store, git }
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Applies `account` to the global Git config, then records `key` as current
    ///
    /// The marker is written only after every configuration step succeeded.
    ///
    /// # Errors
    /// Returns [`AppError::Switch`] wrapping the git or marker failure.
    pub fn switch(&self, key: &str, account: &Account) -> Result<(), AppError> {
        let wrap = |source: AppError| AppError::Switch {
            key: key.to_string(),
            source: Box::new(source),
        };

        if !self.git.is_available() {
            return Err(wrap(AppError::GitNotAvailable));
        }

        info!(key, "switching account");
        self.git.apply_identity(account).map_err(wrap)?;

        if let Some(token) = account.access_token() {
            self.git.clean_url_rewrites();
            self.git
                .apply_token_credentials(account.credential_user(), token);
        }

        self.store.save_current_profile(key).map_err(wrap)?;
        info!(key, "switched account");
        Ok(())
    }

    /// Finds the stored account matching the live identity and records it as current
    ///
    /// Clears the marker when nothing matches. If the live identity cannot be read,
    /// the stored marker is returned unchanged.
    pub fn resync_current_profile(&self) -> Option<String> {
        let identity = match self.git.read_identity() {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "failed to read git identity, keeping stored profile");
                return self.store.current_profile();
            }
        };

        let found = self
            .store
            .load_accounts()
            .into_iter()
            .find(|(_, account)| identity.is_account(account))
            .map(|(key, _)| key);

        match found {
            Some(key) => {
                if let Err(e) = self.store.save_current_profile(&key) {
                    warn!(key = %key, error = %e, "failed to save current profile");
                }
                Some(key)
            }
            None => {
                if let Err(e) = self.store.remove_current_profile() {
                    warn!(error = %e, "failed to clear current profile");
                }
                None
            }
        }
    }
}
