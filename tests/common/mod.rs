use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: OnceLock<Mutex<Vec<TempDir>>> = OnceLock::new();

/// Creates an isolated directory for one test and returns its path.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS
        .get_or_init(|| Mutex::new(Vec::new()))
        .lock()
        .expect("lock temp dir registry")
        .push(temp);
    path
}
