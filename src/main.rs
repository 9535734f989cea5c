use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use git_account_manager::{
    cli::{Cli, Commands},
    commands::App,
    config::AppConfig,
    error::AppError,
    logging::init_logging,
    menu::run_menu,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::resolve(cli.data_dir, cli.git_program, cli.timeout_secs)?;
    let app = App::from_config(&config);

    match cli.command {
        Some(Commands::List) => app.list_accounts(),
        Some(Commands::Add(fields)) => app.add_account(&fields).map(|_| ()),
        Some(Commands::Edit { key, fields }) => app.edit_account(&key, &fields),
        Some(Commands::Delete { key, yes }) => app.delete_account(&key, yes),
        Some(Commands::Switch { key }) => app.switch_account(&key),
        Some(Commands::Current) => app.show_current(),
        Some(Commands::Search { query }) => app.search(&query),
        Some(Commands::Show { key, reveal }) => app.show_account(&key, reveal),
        Some(Commands::Theme { theme }) => app.theme(theme),
        Some(Commands::Language { code }) => app.language(code.as_deref()),
        None => run_menu(&app),
    }
}
