//! Runtime configuration passed into the store, bridge and front end.

use std::{path::PathBuf, time::Duration};

use crate::error::AppError;

/// Directory name under the platform data directory
const APP_DIR_NAME: &str = "git-account-manager";
/// Plaintext credential file read by `credential.helper=store`
const CREDENTIALS_FILE: &str = ".git-credentials";
/// Default limit for a single git invocation
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Convenience settings written on every switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitDefaults {
    pub init_default_branch: String,
    pub pull_rebase: bool,
    pub push_default: String,
    pub credential_helper: String,
}

impl Default for GitDefaults {
    fn default() -> Self {
        Self {
            init_default_branch: "main".to_string(),
            pull_rebase: false,
            push_default: "simple".to_string(),
            credential_helper: "store".to_string(),
        }
    }
}

/// Everything the application needs to locate its files and drive git
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding accounts, marker and preference files
    pub data_dir: PathBuf,
    /// Git executable name or path
    pub git_program: String,
    /// Limit for each git invocation
    pub command_timeout: Duration,
    /// Credential file updated when a token is applied
    pub credentials_file: PathBuf,
    /// Settings (re)applied on every switch
    pub git_defaults: GitDefaults,
}

impl AppConfig {
    /// Builds a config from optional overrides, filling the rest with platform defaults.
    ///
    /// # Errors
    /// Returns [`AppError::HomeDirNotFound`] when a default path needs the home directory
    /// and it cannot be determined.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        git_program: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, AppError> {
        let home_dir = dirs::home_dir().ok_or(AppError::HomeDirNotFound)?;
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .unwrap_or_else(|| home_dir.join(".local").join("share"))
                .join(APP_DIR_NAME),
        };

        Ok(Self {
            data_dir,
            git_program: git_program.unwrap_or_else(|| "git".to_string()),
            command_timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            credentials_file: home_dir.join(CREDENTIALS_FILE),
            git_defaults: GitDefaults::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_defaults() {
        let config = AppConfig::resolve(
            Some(PathBuf::from("/tmp/gam-data")),
            Some("/usr/local/bin/git".to_string()),
            Some(5),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/gam-data"));
        assert_eq!(config.git_program, "/usr/local/bin/git");
        assert_eq!(config.command_timeout, Duration::from_secs(5));
        assert!(config.credentials_file.ends_with(CREDENTIALS_FILE));
    }

    #[test]
    fn defaults() {
        let config = AppConfig::resolve(None, None, None).unwrap();
        assert!(config.data_dir.ends_with(APP_DIR_NAME));
        assert_eq!(config.git_program, "git");
        assert_eq!(config.command_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.git_defaults.credential_helper, "store");
        assert!(!config.git_defaults.pull_rebase);
    }
}
