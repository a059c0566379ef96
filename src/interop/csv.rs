//! CSV round-trips for the expense ledger.
//!
//! Export writes the historical `S.No,Date,Type,Amount` layout with a fresh
//! 1-based sequence. Import is a destructive full replace: the store and the
//! in-memory ledger are cleared before any row is read. Bad records on the
//! way out and bad rows on the way in are skipped with diagnostics, never
//! fatal.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::domain::date::DATE_LEN;
use crate::domain::expense::MAX_CATEGORY_LEN;
use crate::errors::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::storage::ExpenseStore;

/// Header line of the interchange format.
pub const CSV_HEADER: &str = "S.No,Date,Type,Amount";

/// Outcome of an export: rows written and records skipped for empty fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub written: usize,
    pub skipped: usize,
}

/// Outcome of an import: rows accepted plus one entry per skipped line.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Writes the ledger to `path` in interchange form.
///
/// Sequence numbers restart at 1 regardless of persisted identifiers.
/// Records with an empty date or category are skipped and counted, not
/// fatal.
pub fn export_csv(ledger: &Ledger, path: &Path) -> Result<ExportReport> {
    let file = File::create(path).map_err(|source| LedgerError::FileAccess {
        path: path.display().to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{CSV_HEADER}")?;

    let mut report = ExportReport {
        written: 0,
        skipped: 0,
    };
    for record in ledger.iter() {
        if record.date.is_empty() || record.category.is_empty() {
            tracing::warn!(id = record.id, "skipping expense with empty fields during export");
            report.skipped += 1;
            continue;
        }
        writeln!(
            writer,
            "{},{},{},{:.2}",
            report.written + 1,
            record.date,
            record.category,
            record.amount
        )?;
        report.written += 1;
    }
    writer.flush()?;
    tracing::info!(written = report.written, skipped = report.skipped, "CSV export finished");
    Ok(report)
}

/// Replaces the store and ledger contents with the rows of `path`.
///
/// The header line is consumed and discarded. Each data row must parse into
/// exactly four comma-separated fields (sequence, date, category, amount);
/// rows that fail to parse or fail ledger validation are skipped and
/// reported with their line number. Every accepted row receives a freshly
/// generated identifier.
pub fn import_csv(
    ledger: &mut Ledger,
    store: &mut dyn ExpenseStore,
    path: &Path,
) -> Result<ImportReport> {
    let file = File::open(path).map_err(|source| LedgerError::FileAccess {
        path: path.display().to_string(),
        source,
    })?;

    store.clear_all()?;
    ledger.replace_all(Vec::new());

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let mut report = ImportReport::default();

    for (idx, row) in reader.records().enumerate() {
        // 1-based file line, counting the header.
        let line = idx as u64 + 2;
        let record = match row {
            Ok(record) => record,
            Err(err) => {
                skip(&mut report, line, format!("unreadable row: {err}"));
                continue;
            }
        };
        match parse_row(&record) {
            Ok((date, category, amount)) => match ledger.add(store, &date, &category, amount) {
                Ok(_) => report.imported += 1,
                Err(err) => skip(&mut report, line, err.to_string()),
            },
            Err(reason) => skip(&mut report, line, reason),
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped.len(),
        "CSV import finished"
    );
    Ok(report)
}

fn skip(report: &mut ImportReport, line: u64, reason: String) {
    tracing::warn!(line, %reason, "skipping CSV row");
    report.skipped.push(SkippedRow { line, reason });
}

fn parse_row(record: &StringRecord) -> std::result::Result<(String, String, f64), String> {
    if record.len() != 4 {
        return Err(format!("expected 4 fields, found {}", record.len()));
    }
    // The sequence column is display-only but must still look like a number.
    if record[0].trim().parse::<i64>().is_err() {
        return Err("sequence column is not a number".into());
    }
    let date = record[1].trim();
    if date.len() > DATE_LEN {
        return Err(format!("date longer than {DATE_LEN} characters"));
    }
    let category = record[2].trim();
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(format!("category longer than {MAX_CATEGORY_LEN} characters"));
    }
    let amount: f64 = record[3]
        .trim()
        .parse()
        .map_err(|_| "amount is not a number".to_string())?;
    Ok((date.to_string(), category.to_string(), amount))
}
