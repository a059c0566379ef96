//! One handler per menu operation.
//!
//! Handlers prompt, delegate to the engine, and report. Validation and
//! budget-gate rejections abort only the operation at hand; storage errors
//! bubble up to the loop, which reports them and keeps running.

use crate::cli::context::ShellContext;
use crate::cli::io::{self, Prompter};
use crate::cli::output;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::domain::expense::Expense;
use crate::errors::{CliError, LedgerError};
use crate::interop::csv;

pub fn set_budget(context: &mut ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    let Some(value) = io::prompt_amount(prompter, "Enter your budget (0 clears it): ")? else {
        return Ok(());
    };
    context.budget.set_ceiling(value)?;
    match context.budget.ceiling() {
        Some(ceiling) => output::success(format!("Budget set to {ceiling:.2}")),
        None => output::info("Budget ceiling cleared; spending is unlimited."),
    }
    Ok(())
}

pub fn add_expense(context: &mut ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    // Refuse before prompting when spending already sits at the ceiling.
    if let Err(err) = context.budget.check_add(context.ledger.total(), 0.0) {
        output::warning(err.to_string());
        return Ok(());
    }

    let Some(date) = io::prompt_date(prompter, "Enter date (dd/mm/yyyy): ")? else {
        return Ok(());
    };
    let Some(category) = io::prompt_category(prompter, "Enter type of expense: ")? else {
        return Ok(());
    };
    let Some(amount) = io::prompt_amount(prompter, "Enter amount: ")? else {
        return Ok(());
    };

    if let Err(err) = context.budget.check_add(context.ledger.total(), amount) {
        output::warning(err.to_string());
        return Ok(());
    }

    context
        .ledger
        .add(context.store.as_mut(), &date, &category, amount)?;
    match context.budget.remaining(context.ledger.total()) {
        Some(remaining) => output::success(format!(
            "Expense added. Remaining budget: {remaining:.2}"
        )),
        None => output::success("Expense added."),
    }
    Ok(())
}

pub fn edit_expense(context: &mut ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    if context.ledger.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    view_expenses(context);

    let Some(position) = io::prompt_position(prompter, "Enter S.No to edit: ")? else {
        return Ok(());
    };
    if position > context.ledger.len() {
        output::warning(
            LedgerError::OutOfRange {
                position,
                len: context.ledger.len(),
            }
            .to_string(),
        );
        return Ok(());
    }

    let Some(date) = io::prompt_date(prompter, "Enter new date (dd/mm/yyyy): ")? else {
        return Ok(());
    };
    let Some(category) = io::prompt_category(prompter, "Enter new type: ")? else {
        return Ok(());
    };
    let Some(amount) = io::prompt_amount(prompter, "Enter new amount: ")? else {
        return Ok(());
    };

    context
        .ledger
        .update(context.store.as_mut(), position, &date, &category, amount)?;
    output::success("Expense updated successfully.");
    Ok(())
}

pub fn delete_expense(context: &mut ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    if context.ledger.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    view_expenses(context);

    let Some(position) = io::prompt_position(prompter, "Enter S.No to delete: ")? else {
        return Ok(());
    };
    match context.ledger.remove(context.store.as_mut(), position) {
        Ok(_) => match context.budget.remaining(context.ledger.total()) {
            Some(remaining) => output::success(format!(
                "Expense deleted. Remaining budget: {remaining:.2}"
            )),
            None => output::success("Expense deleted."),
        },
        Err(err @ LedgerError::OutOfRange { .. }) => output::warning(err.to_string()),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub fn view_expenses(context: &ShellContext) {
    if context.ledger.is_empty() {
        output::info("No expenses recorded.");
        return;
    }
    let table = listing_table(context.ledger.iter().enumerate());
    println!("{}", table.render());
}

pub fn view_by_category(context: &ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    if context.ledger.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    let Some(name) = io::prompt_category(prompter, "Enter the category to search for: ")? else {
        return Ok(());
    };
    if context.ledger.filter_by_category(&name).is_empty() {
        output::info(format!("No expenses found for category '{name}'."));
        return Ok(());
    }
    // Keep the global S.No of each match so positional edits still work.
    let table = listing_table(
        context
            .ledger
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches_category(&name)),
    );
    println!("{}", table.render());
    Ok(())
}

pub fn view_total(context: &ShellContext) {
    output::info(format!("Total expense: {:.2}", context.ledger.total()));
    if let Some(remaining) = context.budget.remaining(context.ledger.total()) {
        output::info(format!("Remaining budget: {remaining:.2}"));
    }
}

pub fn export_csv(context: &ShellContext) -> Result<(), CliError> {
    match csv::export_csv(&context.ledger, &context.config.csv_file) {
        Ok(report) => {
            if report.skipped > 0 {
                output::warning(format!(
                    "Skipped {} record(s) with empty fields.",
                    report.skipped
                ));
            }
            output::success(format!(
                "Exported {} expense(s) to {}",
                report.written,
                context.config.csv_file.display()
            ));
        }
        Err(err @ LedgerError::FileAccess { .. }) => output::error(err.to_string()),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub fn import_csv(context: &mut ShellContext, prompter: &mut Prompter) -> Result<(), CliError> {
    output::warning("Import replaces every stored expense with the file contents.");
    let Some(confirmed) = io::confirm(prompter, "Proceed? (y/N): ")? else {
        return Ok(());
    };
    if !confirmed {
        output::info("Import cancelled.");
        return Ok(());
    }

    match csv::import_csv(
        &mut context.ledger,
        context.store.as_mut(),
        &context.config.csv_file,
    ) {
        Ok(report) => {
            for row in &report.skipped {
                output::warning(format!("Skipped line {}: {}", row.line, row.reason));
            }
            output::success(format!(
                "Imported {} expense(s) from {}",
                report.imported,
                context.config.csv_file.display()
            ));
        }
        Err(err @ LedgerError::FileAccess { .. }) => output::error(err.to_string()),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn listing_table<'a>(rows: impl Iterator<Item = (usize, &'a Expense)>) -> Table {
    let mut table = Table::new(vec![
        TableColumn {
            header: "S.No",
            alignment: Alignment::Right,
        },
        TableColumn {
            header: "Date",
            alignment: Alignment::Left,
        },
        TableColumn {
            header: "Type",
            alignment: Alignment::Left,
        },
        TableColumn {
            header: "Amount",
            alignment: Alignment::Right,
        },
    ]);
    for (idx, record) in rows {
        table.push_row(vec![
            (idx + 1).to_string(),
            record.date.clone(),
            record.category.clone(),
            format!("{:.2}", record.amount),
        ]);
    }
    table
}
