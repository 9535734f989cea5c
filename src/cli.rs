use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::Theme;

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(
    name = "gam",
    about = "Store Git identities and switch the global Git configuration between them",
    version
)]
pub struct Cli {
    /// Directory holding accounts and preferences
    #[arg(long, global = true, env = "GAM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Git executable to run
    #[arg(long = "git", global = true, env = "GAM_GIT")]
    pub git_program: Option<String>,

    /// Seconds each git command may run
    #[arg(long = "timeout", global = true, env = "GAM_GIT_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand chosen to execute; interactive menu when absent
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Account fields given on the command line
#[derive(Args, Debug, Default)]
pub struct AccountArgs {
    /// Display name, written to user.name
    #[arg(long)]
    pub name: Option<String>,
    /// Email address, written to user.email
    #[arg(long)]
    pub email: Option<String>,
    /// GitHub username, written to github.user
    #[arg(long)]
    pub username: Option<String>,
    /// GitHub personal access token
    #[arg(long)]
    pub token: Option<String>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists all stored accounts, marking the current one
    List,
    /// Adds a new account
    Add(AccountArgs),
    /// Edits an account; omitted fields keep their value, empty strings clear optional ones
    Edit {
        /// Key of account to edit
        key: String,
        #[command(flatten)]
        fields: AccountArgs,
    },
    /// Deletes an account
    Delete {
        /// Key of account to delete
        key: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Switches the global Git identity to an account
    Switch {
        /// Key of account to switch to
        key: String,
    },
    /// Displays the current Git identity and matching account
    Current,
    /// Finds accounts by name, email or username
    Search {
        /// Case-insensitive text to look for
        query: String,
    },
    /// Shows one account
    Show {
        /// Key of account to show
        key: String,
        /// Print the token instead of a mask
        #[arg(long)]
        reveal: bool,
    },
    /// Shows or sets the theme preference
    Theme {
        /// New theme
        #[arg(value_enum)]
        theme: Option<Theme>,
    },
    /// Shows or sets the language preference
    Language {
        /// Language code (en, id)
        code: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_optionals() {
        let cli = Cli::try_parse_from([
            "gam",
            "add",
            "--name",
            "Alice Dev",
            "--email",
            "alice@x.com",
            "--username",
            "alice",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.name.as_deref(), Some("Alice Dev"));
                assert_eq!(args.username.as_deref(), Some("alice"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_theme_and_global_flags() {
        let cli = Cli::try_parse_from(["gam", "-vv", "theme", "light", "--data-dir", "/tmp/x"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                theme: Some(Theme::Light)
            })
        ));
    }
}
