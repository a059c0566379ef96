//! Line input for the shell: rustyline when interactive, plain stdin when
//! scripted.

use std::io::{self, BufRead, Write};

use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use crate::cli::output;
use crate::domain::date;
use crate::domain::expense::MAX_CATEGORY_LEN;
use crate::errors::CliError;

/// When set, the shell reads plain stdin lines instead of opening rustyline.
pub const SCRIPT_MODE_ENV: &str = "EXPENSE_CORE_CLI_SCRIPT";

/// Source of user input lines for prompts and the menu.
pub enum Prompter {
    Interactive(Box<Editor<(), DefaultHistory>>),
    Script(io::Stdin),
}

impl Prompter {
    pub fn from_env() -> Result<Self, CliError> {
        if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
            Ok(Self::Script(io::stdin()))
        } else {
            Ok(Self::Interactive(Box::new(Editor::new()?)))
        }
    }

    /// Reads one trimmed line, returning `None` on end of input or interrupt.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self {
            Self::Interactive(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    let trimmed = line.trim().to_string();
                    if !trimmed.is_empty() {
                        editor.add_history_entry(&trimmed).ok();
                    }
                    Ok(Some(trimmed))
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
                Err(err) => Err(err.into()),
            },
            Self::Script(stdin) => {
                print!("{prompt}");
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                Ok(Some(line.trim().to_string()))
            }
        }
    }
}

/// Prompts until the input is a real `dd/mm/yyyy` date; `None` on EOF.
pub fn prompt_date(prompter: &mut Prompter, prompt: &str) -> Result<Option<String>, CliError> {
    loop {
        let Some(line) = prompter.read_line(prompt)? else {
            return Ok(None);
        };
        if date::is_valid(&line) {
            return Ok(Some(line));
        }
        output::warning("Invalid date format or value. Try again.");
    }
}

/// Prompts until the input is a non-empty category within the length bound.
pub fn prompt_category(prompter: &mut Prompter, prompt: &str) -> Result<Option<String>, CliError> {
    loop {
        let Some(line) = prompter.read_line(prompt)? else {
            return Ok(None);
        };
        if line.is_empty() {
            output::warning("Category cannot be empty.");
        } else if line.chars().count() > MAX_CATEGORY_LEN {
            output::warning(format!("Category is limited to {MAX_CATEGORY_LEN} characters."));
        } else {
            return Ok(Some(line));
        }
    }
}

/// Prompts until the input parses as a non-negative amount.
pub fn prompt_amount(prompter: &mut Prompter, prompt: &str) -> Result<Option<f64>, CliError> {
    loop {
        let Some(line) = prompter.read_line(prompt)? else {
            return Ok(None);
        };
        match line.parse::<f64>() {
            Ok(value) if value >= 0.0 => return Ok(Some(value)),
            Ok(_) => output::warning("Amount cannot be negative."),
            Err(_) => output::warning("Enter a numeric amount."),
        }
    }
}

/// Prompts until the input parses as a 1-based listing position.
pub fn prompt_position(prompter: &mut Prompter, prompt: &str) -> Result<Option<usize>, CliError> {
    loop {
        let Some(line) = prompter.read_line(prompt)? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(position) if position >= 1 => return Ok(Some(position)),
            _ => output::warning("Enter a listing number (S.No)."),
        }
    }
}

/// Yes/no confirmation; anything but `y`/`yes` declines. `None` on EOF.
pub fn confirm(prompter: &mut Prompter, prompt: &str) -> Result<Option<bool>, CliError> {
    let Some(line) = prompter.read_line(prompt)? else {
        return Ok(None);
    };
    Ok(Some(
        line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes"),
    ))
}
