use std::sync::LazyLock;

use colored::Colorize;
use inquire::Text;
use regex::Regex;

use crate::{error::AppError, profile::Account};

/// Maximum length of a derived account key
const MAX_KEY_LENGTH: usize = 15;
/// Minimum length of a display name
const MIN_NAME_LENGTH: usize = 2;
/// Key used when a name sanitizes to nothing
const FALLBACK_KEY: &str = "account";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]{1,39}$").expect("valid username regex"));
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ghp_[a-zA-Z0-9]{36}$").expect("valid token regex"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s\-'.]+$").expect("valid name regex"));
static KEY_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s-]").expect("valid key regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Checks `local@domain.tld` shape
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// GitHub handle: 1-39 alphanumerics or hyphens
pub fn validate_username(username: &str) -> bool {
    USERNAME_RE.is_match(username.trim())
}

/// GitHub classic personal access token: `ghp_` followed by 36 alphanumerics
pub fn validate_token(token: &str) -> bool {
    TOKEN_RE.is_match(token.trim())
}

/// Letters, spaces, hyphens, apostrophes and periods, at least two characters
pub fn validate_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= MIN_NAME_LENGTH && NAME_RE.is_match(name)
}

/// Validates a whole record, collecting every problem instead of stopping at the first.
///
/// # Errors
/// Returns [`AppError::Validation`] listing each failing field.
pub fn validate_account(account: &Account) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if account.name.is_empty() {
        errors.push("Name is required".to_string());
    } else if !validate_name(&account.name) {
        errors.push("Invalid name format".to_string());
    }

    if account.email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !validate_email(&account.email) {
        errors.push("Invalid email format".to_string());
    }

    if let Some(username) = account.github_user() {
        if !validate_username(username) {
            errors.push("Invalid GitHub username format".to_string());
        }
    }

    if let Some(token) = account.access_token() {
        if !validate_token(token) {
            errors.push("Invalid GitHub token format".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Derives a store key from a display name
///
/// Lowercases, drops anything but ASCII alphanumerics, whitespace and hyphens,
/// joins whitespace runs with a single hyphen and keeps the first 15 characters.
pub fn sanitize_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = KEY_STRIP_RE.replace_all(&lowered, "");
    let joined = WHITESPACE_RE.replace_all(stripped.trim(), "-");
    let key: String = joined.chars().take(MAX_KEY_LENGTH).collect();

    if key.is_empty() {
        FALLBACK_KEY.to_string()
    } else {
        key
    }
}

/// Prompts user for input until valid input is provided
///
/// # Arguments
/// * `prompt_message` - Text shown before the cursor
/// * `initial` - Pre-filled value, used when editing
/// * `input_validation` - Check run on the trimmed input
pub fn prompt_until_valid<F>(
    prompt_message: &str,
    initial: Option<&str>,
    input_validation: F,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Result<(), AppError>,
{
    loop {
        let mut text = Text::new(prompt_message);
        if let Some(value) = initial {
            text = text.with_initial_value(value);
        }
        let input = text.prompt()?.trim().to_string();
        match input_validation(&input) {
            Ok(()) => break Ok(input),
            Err(AppError::Validation(messages)) => {
                for msg in messages {
                    println!("{}", msg.red());
                }
            }
            Err(e) => return Err(e),
        }
    }
}

// Validate input helper functions

/// Validates name input
pub fn validate_input_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(field_error("Name is required"))
    } else if !validate_name(name) {
        Err(field_error("Invalid name format"))
    } else {
        Ok(())
    }
}

/// Validates email input against format and the emails already stored
///
/// # Arguments
/// * `existing` - Stored accounts keyed by account key
/// * `editing` - Key of the account being edited, whose own email is allowed
pub fn validate_input_email(
    email: &str,
    existing: &[(String, Account)],
    editing: Option<&str>,
) -> Result<(), AppError> {
    if email.is_empty() {
        Err(field_error("Email is required"))
    } else if !validate_email(email) {
        Err(field_error("Invalid email format"))
    } else if existing
        .iter()
        .any(|(key, account)| Some(key.as_str()) != editing && account.email == email)
    {
        Err(field_error(&format!("Account with email {email} already exists")))
    } else {
        Ok(())
    }
}

/// Validates optional GitHub username input
pub fn validate_input_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() || validate_username(username) {
        Ok(())
    } else {
        Err(field_error("Invalid GitHub username format"))
    }
}

/// Validates optional token input
pub fn validate_input_token(token: &str) -> Result<(), AppError> {
    if token.is_empty() || validate_token(token) {
        Ok(())
    } else {
        Err(field_error("Invalid GitHub token format"))
    }
}

fn field_error(message: &str) -> AppError {
    AppError::Validation(vec![message.to_string()])
}
