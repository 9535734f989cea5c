use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Git executable could not be found
    #[error("git is not installed or not in PATH")]
    GitNotAvailable,
    /// Git command exited with a non-zero status
    #[error("command '{command}' failed with code {code}: {message}")]
    GitCommand {
        command: String,
        code: i32,
        message: String,
    },
    /// Git command did not finish within the configured limit
    #[error("command '{command}' timed out after {secs} seconds")]
    GitTimeout { command: String, secs: u64 },
    /// Applying an identity to the global git config failed
    #[error("failed to configure git account: {0}")]
    GitConfig(Box<AppError>),
    /// Switching to a profile failed; the current-profile marker was not written
    #[error("failed to switch to '{key}': {source}")]
    Switch {
        key: String,
        #[source]
        source: Box<AppError>,
    },
    /// One or more field-format violations
    #[error("validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// Another account already uses this email
    #[error("account with email {0} already exists")]
    DuplicateEmail(String),
    /// Error when a specific account key is not found.
    #[error("account not found: '{0}'")]
    AccountNotFound(String),
    /// Error when the store holds no accounts.
    #[error("no accounts found")]
    NoAccounts,
    /// Home directory could not be determined
    #[error("failed to find the home directory")]
    HomeDirNotFound,
    /// Language code outside the supported set
    #[error("unsupported language: '{0}'")]
    UnsupportedLanguage(String),
}

impl AppError {
    /// Field messages carried by a validation failure, empty for other kinds.
    pub fn validation_messages(&self) -> &[String] {
        match self {
            Self::Validation(messages) => messages,
            _ => &[],
        }
    }
}
