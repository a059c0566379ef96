//! Menu loop and dispatch.

use crate::cli::context::ShellContext;
use crate::cli::handlers;
use crate::cli::io::Prompter;
use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::errors::CliError;

const MENU: &[(&str, &str)] = &[
    ("1", "Set Budget"),
    ("2", "Add Expense"),
    ("3", "Edit Expense"),
    ("4", "Delete Expense"),
    ("5", "View All Expenses"),
    ("6", "View Expenses by Category"),
    ("7", "View Total"),
    ("8", "Export to CSV"),
    ("9", "Import from CSV"),
    ("10", "Exit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    // Only a store that cannot be opened is fatal; a broken configuration
    // file falls back to defaults.
    let config = match ConfigManager::new().load() {
        Ok(config) => config,
        Err(err) => {
            output::warning(format!("Could not read configuration: {err}. Using defaults."));
            Config::default()
        }
    };
    let mut context = ShellContext::bootstrap(config)?;
    let mut prompter = Prompter::from_env()?;
    run_loop(&mut context, &mut prompter)
}

fn run_loop(context: &mut ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    loop {
        render_menu();
        let Some(choice) = prompter.read_line("Choose an option: ")? else {
            output::info("Exiting.");
            return Ok(());
        };
        match dispatch(context, prompter, choice.trim()) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => return Ok(()),
            Err(err) => output::error(err.to_string()),
        }
    }
}

fn render_menu() {
    output::section("Expense Tracker");
    for (key, label) in MENU {
        println!("{key:>2}. {label}");
    }
}

fn dispatch(
    context: &mut ShellContext,
    prompter: &mut Prompter,
    choice: &str,
) -> Result<LoopControl, CliError> {
    match choice {
        "1" => handlers::set_budget(context, prompter)?,
        "2" => handlers::add_expense(context, prompter)?,
        "3" => handlers::edit_expense(context, prompter)?,
        "4" => handlers::delete_expense(context, prompter)?,
        "5" => handlers::view_expenses(context),
        "6" => handlers::view_by_category(context, prompter)?,
        "7" => handlers::view_total(context),
        "8" => handlers::export_csv(context)?,
        "9" => handlers::import_csv(context, prompter)?,
        "10" | "exit" => {
            output::info("Goodbye.");
            return Ok(LoopControl::Exit);
        }
        other => output::warning(format!("Invalid option `{other}`.")),
    }
    Ok(LoopControl::Continue)
}
