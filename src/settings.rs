use std::{
    fmt,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::AppError,
    storage::{read_json, write_json},
};

/// Theme preference file inside the data directory
const THEME_FILE: &str = "theme_config.json";
/// Language preference file inside the data directory
const LANGUAGE_FILE: &str = "language_config.json";
/// Language used when no preference is stored
pub const DEFAULT_LANGUAGE: &str = "en";

/// Supported language codes with their display names
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("id", "Bahasa Indonesia")];

/// Theme preference
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    #[default]
    System,
}

impl Theme {
    /// Concrete theme, resolving `System` from the terminal's `COLORFGBG` hint
    pub fn resolve(self) -> Self {
        match self {
            Self::System => detect_terminal_theme(std::env::var("COLORFGBG").ok().as_deref()),
            other => other,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::System => "system",
        };
        f.write_str(name)
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); backgrounds 7 and 15 are light.
fn detect_terminal_theme(colorfgbg: Option<&str>) -> Theme {
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7 | 15) => Theme::Light,
        _ => Theme::Dark,
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct ThemeConfig {
    #[serde(default)]
    theme: Theme,
}

#[derive(Serialize, Deserialize, Debug)]
struct LanguageConfig {
    language: String,
}

/// Theme and language preferences stored next to the accounts
#[derive(Debug, Clone)]
pub struct Settings {
    data_dir: PathBuf,
}

impl Settings {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Stored theme; a missing file is created with `system`, an unreadable one falls back to `dark`
    pub fn theme(&self) -> Theme {
        let path = self.path(THEME_FILE);
        if !path.exists() {
            self.persist_default(&path, &ThemeConfig { theme: Theme::System });
            return Theme::System;
        }
        read_json::<ThemeConfig>(&self.data_dir, &path)
            .map_or(Theme::Dark, |config| config.theme)
    }

    /// Stores a theme preference
    pub fn set_theme(&self, theme: Theme) -> Result<(), AppError> {
        write_json(&self.data_dir, &self.path(THEME_FILE), &ThemeConfig { theme })?;
        info!(%theme, resolved = %theme.resolve(), "theme applied");
        Ok(())
    }

    /// Stored language code; missing is created with the default, unreadable falls back to it
    pub fn language(&self) -> String {
        let path = self.path(LANGUAGE_FILE);
        if !path.exists() {
            self.persist_default(
                &path,
                &LanguageConfig {
                    language: DEFAULT_LANGUAGE.to_string(),
                },
            );
            return DEFAULT_LANGUAGE.to_string();
        }
        read_json::<LanguageConfig>(&self.data_dir, &path)
            .map_or_else(|| DEFAULT_LANGUAGE.to_string(), |config| config.language)
    }

    /// Stores a language preference
    ///
    /// # Errors
    /// Returns [`AppError::UnsupportedLanguage`] for codes outside [`LANGUAGES`].
    pub fn set_language(&self, code: &str) -> Result<(), AppError> {
        let Some(name) = language_name(code) else {
            return Err(AppError::UnsupportedLanguage(code.to_string()));
        };
        write_json(
            &self.data_dir,
            &self.path(LANGUAGE_FILE),
            &LanguageConfig {
                language: code.to_string(),
            },
        )?;
        info!(code, name, "language set");
        Ok(())
    }

    fn persist_default<T: Serialize>(&self, path: &Path, value: &T) {
        if let Err(e) = write_json(&self.data_dir, path, value) {
            warn!(path = %path.display(), error = %e, "failed to write default preference");
        }
    }
}

/// Display name of a supported language code
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn theme_defaults_to_system_and_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path());
        assert_eq!(settings.theme(), Theme::System);
        let written = fs::read_to_string(dir.path().join(THEME_FILE)).unwrap();
        assert!(written.contains(r#""theme": "system""#));
    }

    #[test]
    fn theme_round_trip_and_corrupt_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path());
        settings.set_theme(Theme::Light).unwrap();
        assert_eq!(settings.theme(), Theme::Light);

        fs::write(dir.path().join(THEME_FILE), r#"{"theme": "neon"}"#).unwrap();
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn theme_file_without_key_reads_as_system() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(THEME_FILE), "{}").unwrap();
        assert_eq!(Settings::new(dir.path()).theme(), Theme::System);
    }

    #[test]
    fn language_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path());
        assert_eq!(settings.language(), "en");
        settings.set_language("id").unwrap();
        assert_eq!(settings.language(), "id");
    }

    #[test]
    fn unsupported_language_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path());
        let err = settings.set_language("xx").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedLanguage(code) if code == "xx"));
        assert_eq!(settings.language(), "en");
    }

    #[test]
    fn terminal_theme_detection() {
        assert_eq!(detect_terminal_theme(Some("0;15")), Theme::Light);
        assert_eq!(detect_terminal_theme(Some("0;default;7")), Theme::Light);
        assert_eq!(detect_terminal_theme(Some("15;0")), Theme::Dark);
        assert_eq!(detect_terminal_theme(None), Theme::Dark);
        assert_eq!(Theme::Light.resolve(), Theme::Light);
    }
}
