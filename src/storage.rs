use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{error::AppError, profile::Account};

/// Accounts file inside the data directory
const ACCOUNTS_FILE: &str = "accounts.json";
/// Current-profile marker file inside the data directory
const CURRENT_PROFILE_FILE: &str = ".git_current_profile";

/// Account key to record mapping as persisted on disk
pub type Accounts = BTreeMap<String, Account>;

/// File-backed storage for accounts and the current-profile marker
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Creates a store rooted at `data_dir`; the directory is created on first use
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding every file of this store
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the accounts file
    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    /// Path to the current-profile marker
    pub fn current_profile_path(&self) -> PathBuf {
        self.data_dir.join(CURRENT_PROFILE_FILE)
    }

    /// Loads accounts from the JSON file
    ///
    /// A missing, empty or unparsable file yields an empty mapping; parse failures are logged.
    pub fn load_accounts(&self) -> Accounts {
        read_json(&self.data_dir, &self.accounts_path()).unwrap_or_default()
    }

    /// Saves accounts to the JSON file, replacing its contents
    ///
    /// # Arguments
    /// * `accounts` - Complete mapping to persist
    pub fn save_accounts(&self, accounts: &Accounts) -> Result<(), AppError> {
        write_json(&self.data_dir, &self.accounts_path(), accounts)
    }

    /// Reads the current-profile marker; absence or a read fault means no current profile
    pub fn current_profile(&self) -> Option<String> {
        let path = self.current_profile_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let key = contents.trim();
                (!key.is_empty()).then(|| key.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read current profile");
                None
            }
        }
    }

    /// Writes `key` as the current profile
    pub fn save_current_profile(&self, key: &str) -> Result<(), AppError> {
        ensure_dir(&self.data_dir)?;
        fs::write(self.current_profile_path(), key)?;
        debug!(key, "saved current profile");
        Ok(())
    }

    /// Removes the current-profile marker; succeeds when it is already gone
    pub fn remove_current_profile(&self) -> Result<(), AppError> {
        match fs::remove_file(self.current_profile_path()) {
            Ok(()) => {
                debug!("removed current profile");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Creates `dir` and its parents when missing
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        debug!(path = %dir.display(), "created data directory");
    }
    Ok(())
}

/// Reads a JSON document, returning `None` when the file is absent, blank or malformed.
pub(crate) fn read_json<T: DeserializeOwned>(dir: &Path, path: &Path) -> Option<T> {
    if let Err(e) = ensure_dir(dir) {
        warn!(path = %dir.display(), error = %e, "failed to create data directory");
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file");
            return None;
        }
    };

    if contents.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse file");
            None
        }
    }
}

/// Serializes `value` to a sibling temp file, then renames it over `path`.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    dir: &Path,
    path: &Path,
    value: &T,
) -> Result<(), AppError> {
    ensure_dir(dir)?;
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "saved file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = Store::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn missing_files_yield_defaults() {
        let (_dir, store) = store();
        assert!(store.load_accounts().is_empty());
        assert_eq!(store.current_profile(), None);
        assert!(store.data_dir().exists());
    }

    #[test]
    fn malformed_accounts_file_yields_empty_mapping() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.accounts_path(), "{ not json").unwrap();
        assert!(store.load_accounts().is_empty());
    }

    #[test]
    fn accounts_round_trip_preserves_bytes() {
        let (_dir, store) = store();
        let mut accounts = Accounts::new();
        accounts.insert(
            "bob".to_string(),
            Account::new("Bob", "bob@x.com", Some("bobgh"), None),
        );
        accounts.insert(
            "alice-dev".to_string(),
            Account::new("Alice Dev", "alice@x.com", None, None),
        );
        store.save_accounts(&accounts).unwrap();
        let before = fs::read(store.accounts_path()).unwrap();

        store.save_accounts(&store.load_accounts()).unwrap();
        let after = fs::read(store.accounts_path()).unwrap();

        assert_eq!(before, after);
        assert_eq!(store.load_accounts(), accounts);
    }

    #[test]
    fn reads_records_written_with_empty_optionals() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(
            store.accounts_path(),
            r#"{"work": {"name": "Work Me", "email": "me@work.com", "username": ""}}"#,
        )
        .unwrap();
        let accounts = store.load_accounts();
        assert_eq!(accounts["work"].github_user(), None);
        assert_eq!(accounts["work"].token, None);
    }

    #[test]
    fn current_profile_lifecycle() {
        let (_dir, store) = store();
        store.save_current_profile("alice-dev").unwrap();
        assert_eq!(store.current_profile().as_deref(), Some("alice-dev"));

        store.remove_current_profile().unwrap();
        assert_eq!(store.current_profile(), None);
        store.remove_current_profile().unwrap();
    }

    #[test]
    fn blank_marker_means_no_profile() {
        let (_dir, store) = store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.current_profile_path(), "  \n").unwrap();
        assert_eq!(store.current_profile(), None);
    }
}
