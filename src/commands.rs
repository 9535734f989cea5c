use colored::Colorize;
use inquire::Confirm;

use crate::{
    cli::AccountArgs,
    config::AppConfig,
    error::AppError,
    git::{GitBridge, GitCli},
    manager::AccountManager,
    profile::Account,
    settings::{LANGUAGES, Settings, Theme, language_name},
    storage::Store,
    switcher::ProfileSwitcher,
};

/// Components behind every command, wired from one [`AppConfig`]
#[derive(Debug)]
pub struct App<G> {
    pub manager: AccountManager,
    pub switcher: ProfileSwitcher<G>,
    pub settings: Settings,
}

impl App<GitCli> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Store::new(&config.data_dir),
            GitCli::new(config),
            Settings::new(&config.data_dir),
        )
    }
}

impl<G: GitBridge> App<G> {
    pub fn new(store: Store, git: G, settings: Settings) -> Self {
        Self {
            manager: AccountManager::new(store.clone()),
            switcher: ProfileSwitcher::new(store, git),
            settings,
        }
    }

    /// Current profile after checking it against the live identity
    pub fn current_key(&self) -> Option<String> {
        self.switcher.resync_current_profile()
    }

    /// Lists all accounts, marking the current one
    pub fn list_accounts(&self) -> Result<(), AppError> {
        let accounts = self.manager.list();
        if accounts.is_empty() {
            print_empty_state();
            return Ok(());
        }
        print_accounts(&accounts, self.current_key().as_deref());
        Ok(())
    }

    /// Adds an account from command-line fields
    pub fn add_account(&self, fields: &AccountArgs) -> Result<String, AppError> {
        let account = Account::new(
            fields.name.as_deref().unwrap_or_default(),
            fields.email.as_deref().unwrap_or_default(),
            fields.username.as_deref(),
            fields.token.as_deref(),
        );
        self.add(account)
    }

    /// Stores `account` and reports the assigned key
    pub fn add(&self, account: Account) -> Result<String, AppError> {
        let name = account.name.clone();
        let key = self.manager.add(account)?;
        println!(
            "{} account '{}' added as {}",
            "✓".green(),
            name,
            key.cyan()
        );
        Ok(key)
    }

    /// Edits an account, keeping any field not given
    pub fn edit_account(&self, key: &str, fields: &AccountArgs) -> Result<(), AppError> {
        let existing = self
            .manager
            .get(key)
            .ok_or_else(|| AppError::AccountNotFound(key.to_string()))?;
        self.update(key, merge_fields(&existing, fields))
    }

    /// Replaces the account under `key` and reports it
    pub fn update(&self, key: &str, account: Account) -> Result<(), AppError> {
        let name = account.name.clone();
        self.manager.update(key, account)?;
        println!("{} account '{}' updated", "✓".green(), name);
        Ok(())
    }

    /// Deletes an account, asking first unless `confirmed`
    pub fn delete_account(&self, key: &str, confirmed: bool) -> Result<(), AppError> {
        let account = self
            .manager
            .get(key)
            .ok_or_else(|| AppError::AccountNotFound(key.to_string()))?;

        if !confirmed && !confirm_delete(&account)? {
            println!("{}", "cancelled".yellow());
            return Ok(());
        }

        let removed = self.manager.delete(key)?;
        println!("{} account '{}' deleted", "✓".green(), removed.name);
        Ok(())
    }

    /// Switches the global Git identity to the account under `key`
    pub fn switch_account(&self, key: &str) -> Result<(), AppError> {
        let account = self
            .manager
            .get(key)
            .ok_or_else(|| AppError::AccountNotFound(key.to_string()))?;
        self.switcher.switch(key, &account)?;

        println!("{} {} {}", "switched to:".green(), key.cyan(), account);
        if account.access_token().is_some() {
            println!(
                "  {} token credentials saved for {}",
                "🔑".dimmed(),
                account.credential_user()
            );
        }
        Ok(())
    }

    /// Displays the live Git identity and which stored account it belongs to
    pub fn show_current(&self) -> Result<(), AppError> {
        let identity = self.switcher.git().read_identity()?;
        println!(
            "{} {} <{}>",
            "current user:".blue(),
            identity.name,
            identity.email
        );
        if !identity.username.is_empty() {
            println!("{} {}", "github user:".blue(), identity.username);
        }
        match self.switcher.resync_current_profile() {
            Some(key) => println!("{} {}", "profile:".blue(), key.cyan()),
            None => println!("{}", "no stored account matches this identity".yellow()),
        }
        Ok(())
    }

    /// Lists accounts matching `query`
    pub fn search(&self, query: &str) -> Result<(), AppError> {
        let results = self.manager.search(query);
        if results.is_empty() {
            println!("{} '{}'", "no accounts match".yellow(), query);
            return Ok(());
        }
        print_accounts(&results, self.manager.current_profile().as_deref());
        Ok(())
    }

    /// Shows every field of one account
    pub fn show_account(&self, key: &str, reveal: bool) -> Result<(), AppError> {
        let account = self
            .manager
            .get(key)
            .ok_or_else(|| AppError::AccountNotFound(key.to_string()))?;
        println!("{} {}", "key:".blue(), key.cyan());
        println!("{} {}", "name:".blue(), account.name);
        println!("{} {}", "email:".blue(), account.email);
        if let Some(username) = account.github_user() {
            println!("{} {}", "username:".blue(), username);
        }
        let token = if reveal {
            account.access_token().map(str::to_string)
        } else {
            account.masked_token()
        };
        if let Some(token) = token {
            println!("{} {}", "token:".blue(), token);
        }
        Ok(())
    }

    /// Prints or stores the theme preference
    pub fn theme(&self, theme: Option<Theme>) -> Result<(), AppError> {
        match theme {
            Some(theme) => {
                self.settings.set_theme(theme)?;
                println!("{} {}", "theme set to:".green(), theme);
            }
            None => {
                let theme = self.settings.theme();
                println!("{} {} ({})", "theme:".blue(), theme, theme.resolve());
            }
        }
        Ok(())
    }

    /// Prints or stores the language preference
    pub fn language(&self, code: Option<&str>) -> Result<(), AppError> {
        match code {
            Some(code) => {
                self.settings.set_language(code)?;
                println!(
                    "{} {}",
                    "language set to:".green(),
                    language_name(code).unwrap_or(code)
                );
            }
            None => {
                let current = self.settings.language();
                for (code, name) in LANGUAGES {
                    let marker = if *code == current { "*" } else { " " };
                    println!("{} {} {}", marker.green(), code.cyan(), name);
                }
            }
        }
        Ok(())
    }
}

/// Applies command-line fields over `existing`; an empty string clears an optional field
pub fn merge_fields(existing: &Account, fields: &AccountArgs) -> Account {
    Account::new(
        fields.name.as_deref().unwrap_or(&existing.name),
        fields.email.as_deref().unwrap_or(&existing.email),
        fields.username.as_deref().or(existing.username.as_deref()),
        fields.token.as_deref().or(existing.token.as_deref()),
    )
}

/// Asks before deleting `account`
pub fn confirm_delete(account: &Account) -> Result<bool, AppError> {
    Ok(Confirm::new(&format!("delete account '{}'?", account.name))
        .with_default(false)
        .prompt()?)
}

fn print_empty_state() {
    println!("{}", "no accounts yet".yellow());
    println!("add one with {}", "gam add --name <NAME> --email <EMAIL>".cyan());
}

fn print_accounts(accounts: &[(String, Account)], current: Option<&str>) {
    for (key, account) in accounts {
        if Some(key.as_str()) == current {
            println!("{} {} {}", "*".green().bold(), key.green().bold(), account);
        } else {
            println!("  {} {}", key.cyan(), account);
        }
        if let Some(masked) = account.masked_token() {
            println!("    {} {}", "token:".dimmed(), masked.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unset_fields_and_clears_blank_ones() {
        let existing = Account::new("Alice Dev", "alice@x.com", Some("alice"), Some("tok"));

        let renamed = merge_fields(
            &existing,
            &AccountArgs {
                name: Some("Alice Smith".to_string()),
                ..AccountArgs::default()
            },
        );
        assert_eq!(renamed.name, "Alice Smith");
        assert_eq!(renamed.email, "alice@x.com");
        assert_eq!(renamed.username.as_deref(), Some("alice"));
        assert_eq!(renamed.token.as_deref(), Some("tok"));

        let cleared = merge_fields(
            &existing,
            &AccountArgs {
                token: Some(String::new()),
                ..AccountArgs::default()
            },
        );
        assert_eq!(cleared.token, None);
        assert_eq!(cleared.username.as_deref(), Some("alice"));
    }
}
