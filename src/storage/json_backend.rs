//! JSON-file backed implementation of the expense store.
//!
//! The whole table lives in one document rewritten atomically on every
//! mutation, with a timestamped backup of the previous contents staged
//! beside the data file and pruned to a retention limit.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::expense::Expense;
use crate::errors::{LedgerError, Result};
use crate::storage::ExpenseStore;

const CURRENT_SCHEMA_VERSION: u32 = 1;
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";

pub const DEFAULT_RETENTION: usize = 5;

/// On-disk document: the expense table plus the id counter.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    schema_version: u32,
    next_id: u64,
    expenses: Vec<Expense>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            next_id: 1,
            expenses: Vec::new(),
        }
    }
}

/// Single-file JSON store with atomic writes and timestamped backups.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    document: StoreDocument,
}

impl JsonStore {
    /// Opens (or initializes) the store at `path`.
    ///
    /// Documents written by a newer schema are refused. Failure here is the
    /// one storage error that is fatal at startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_retention(path, DEFAULT_RETENTION)
    }

    pub fn with_retention(path: impl Into<PathBuf>, retention: usize) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let document: StoreDocument = serde_json::from_str(&data)?;
            if document.schema_version > CURRENT_SCHEMA_VERSION {
                return Err(LedgerError::Storage(format!(
                    "store schema v{} is newer than supported v{}",
                    document.schema_version, CURRENT_SCHEMA_VERSION
                )));
            }
            document
        } else {
            StoreDocument::default()
        };
        let backups_dir = backups_dir_for(&path);
        Ok(Self {
            path,
            backups_dir,
            retention: retention.max(1),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if self.path.exists() {
            self.backup_existing()?;
        }
        let json = serde_json::to_string_pretty(&self.document)?;
        let tmp = tmp_path(&self.path);
        if let Some(parent) = tmp.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn backup_existing(&self) -> Result<()> {
        fs::create_dir_all(&self.backups_dir)?;
        let stem = file_stem(&self.path);
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_path = self.backups_dir.join(format!("{stem}_{timestamp}.json"));
        fs::copy(&self.path, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let mut entries: Vec<PathBuf> = fs::read_dir(&self.backups_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        // Timestamped names sort oldest first.
        entries.sort();
        while entries.len() > self.retention {
            let oldest = entries.remove(0);
            let _ = fs::remove_file(oldest);
        }
        Ok(())
    }

    fn index_of(&self, id: u64) -> Result<usize> {
        self.document
            .expenses
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| LedgerError::Storage(format!("no stored expense with id {id}")))
    }
}

impl ExpenseStore for JsonStore {
    fn create(&mut self, date: &str, category: &str, amount: f64) -> Result<u64> {
        let id = self.document.next_id;
        self.document.next_id += 1;
        self.document
            .expenses
            .push(Expense::with_id(id, date, category, amount));
        if let Err(err) = self.persist() {
            // Undo the staged row; the file still holds the previous document.
            self.document.expenses.pop();
            self.document.next_id = id;
            return Err(err);
        }
        Ok(id)
    }

    fn update(&mut self, id: u64, date: &str, category: &str, amount: f64) -> Result<()> {
        let idx = self.index_of(id)?;
        let previous = self.document.expenses[idx].clone();
        self.document.expenses[idx] = Expense::with_id(id, date, category, amount);
        if let Err(err) = self.persist() {
            self.document.expenses[idx] = previous;
            return Err(err);
        }
        Ok(())
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        let idx = self.index_of(id)?;
        let removed = self.document.expenses.remove(idx);
        if let Err(err) = self.persist() {
            self.document.expenses.insert(idx, removed);
            return Err(err);
        }
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Expense>> {
        Ok(self.document.expenses.clone())
    }

    fn clear_all(&mut self) -> Result<()> {
        let drained = std::mem::take(&mut self.document.expenses);
        if let Err(err) = self.persist() {
            self.document.expenses = drained;
            return Err(err);
        }
        Ok(())
    }
}

fn backups_dir_for(path: &Path) -> PathBuf {
    let stem = file_stem(path);
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(format!("{stem}_backups")),
        _ => PathBuf::from(format!("{stem}_backups")),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("expenses")
        .to_string()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
