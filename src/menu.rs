use colored::Colorize;
use inquire::Select;

use crate::{
    commands::App,
    error::AppError,
    git::GitBridge,
    profile::Account,
    settings::{LANGUAGES, Theme},
    validation::{
        prompt_until_valid, validate_input_email, validate_input_name, validate_input_token,
        validate_input_username,
    },
};

/// Entry returning to the main menu from a selection list
pub const BACK_OPTION: &str = "< back";

/// Runs interactive menu interface
pub fn run_menu<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    loop {
        let actions: Vec<&'static str> = vec![
            "switch account",
            "add account",
            "edit account",
            "delete account",
            "search accounts",
            "show current user",
            "show all accounts",
            "theme",
            "language",
            "quit",
        ];

        let action_selected: &'static str =
            Select::new(&format!("{}", "select action".blue()), actions).prompt()?;

        let result = match action_selected {
            "switch account" => menu_switch_account(app),
            "add account" => menu_add_account(app),
            "edit account" => menu_edit_account(app),
            "delete account" => menu_delete_account(app),
            "search accounts" => menu_search(app),
            "show current user" => app.show_current(),
            "show all accounts" => app.list_accounts(),
            "theme" => menu_theme(app),
            "language" => menu_language(app),
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
            _ => unreachable!("unexpected input"),
        };

        // Operation failures are shown and the menu keeps running.
        match result {
            Ok(()) => {}
            Err(e @ AppError::Inquire(_)) => return Err(e),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

/// Menu for switching accounts
fn menu_switch_account<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    if let Some(key) = select_account(app, "select account to switch to:")? {
        app.switch_account(&key)?;
    }
    Ok(())
}

/// Menu for adding a new account
fn menu_add_account<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    let account = prompt_account(app, None)?;
    app.add(account)?;
    Ok(())
}

/// Menu for editing an account
fn menu_edit_account<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    let Some(key) = select_account(app, "select account to edit:")? else {
        return Ok(());
    };
    let existing = app
        .manager
        .get(&key)
        .ok_or_else(|| AppError::AccountNotFound(key.clone()))?;
    let account = prompt_account(app, Some((key.as_str(), &existing)))?;
    app.update(&key, account)
}

/// Menu for deleting an account
fn menu_delete_account<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    if let Some(key) = select_account(app, "select account to delete:")? {
        app.delete_account(&key, false)?;
    }
    Ok(())
}

fn menu_search<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    let query = inquire::Text::new(&format!("{}", "search for:".blue())).prompt()?;
    app.search(query.trim())
}

fn menu_theme<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    let themes = vec![Theme::Dark, Theme::Light, Theme::System];
    let theme = Select::new(&format!("{}", "select theme:".blue()), themes)
        .with_starting_cursor(match app.settings.theme() {
            Theme::Dark => 0,
            Theme::Light => 1,
            Theme::System => 2,
        })
        .prompt()?;
    app.theme(Some(theme))
}

fn menu_language<G: GitBridge>(app: &App<G>) -> Result<(), AppError> {
    let options: Vec<String> = LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();
    let selected = Select::new(&format!("{}", "select language:".blue()), options).prompt()?;
    let code = selected.split(" - ").next().unwrap_or_default();
    app.language(Some(code))
}

/// Prompts for every field, re-asking until each one is valid
///
/// # Arguments
/// * `editing` - Key and current record when editing, used for defaults and the email check
fn prompt_account<G: GitBridge>(
    app: &App<G>,
    editing: Option<(&str, &Account)>,
) -> Result<Account, AppError> {
    let existing = app.manager.list();
    let current = editing.map(|(_, account)| account);
    let editing_key = editing.map(|(key, _)| key);

    let name = prompt_until_valid(
        &format!("{}", "enter name:".blue()),
        current.map(|a| a.name.as_str()),
        validate_input_name,
    )?;

    let email = prompt_until_valid(
        &format!("{}", "enter email:".blue()),
        current.map(|a| a.email.as_str()),
        |input| validate_input_email(input, &existing, editing_key),
    )?;

    let username = prompt_until_valid(
        &format!("{}", "enter github username (optional):".blue()),
        current.and_then(Account::github_user),
        validate_input_username,
    )?;

    let token = prompt_until_valid(
        &format!("{}", "enter token (optional):".blue()),
        current.and_then(Account::access_token),
        validate_input_token,
    )?;

    Ok(Account::new(&name, &email, Some(&username), Some(&token)))
}

/// Selects an account key, `None` when the user picks back
fn select_account<G: GitBridge>(app: &App<G>, prompt: &str) -> Result<Option<String>, AppError> {
    let accounts = app.manager.list();
    if accounts.is_empty() {
        return Err(AppError::NoAccounts);
    }

    let keys = build_key_list(&accounts);
    let selected: String = Select::new(&format!("{}", prompt.blue()), keys).prompt()?;

    if selected == BACK_OPTION {
        Ok(None)
    } else {
        Ok(Some(selected))
    }
}

/// Builds list of account keys for menu to display
pub fn build_key_list(accounts: &[(String, Account)]) -> Vec<String> {
    let mut keys: Vec<String> = accounts.iter().map(|(key, _)| key.clone()).collect();
    keys.push(BACK_OPTION.to_string());
    keys
}
