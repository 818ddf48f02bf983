//! File locations for the inventory application.
//!
//! The database and logs live next to the running executable. There are no
//! config files or environment overrides.

use std::io;
use std::path::{Path, PathBuf};

/// Database file name, resolved next to the executable.
pub const DB_FILE_NAME: &str = "inventory.db";
/// Log directory name, resolved next to the executable.
pub const LOG_DIR_NAME: &str = "logs";

/// Returns `inventory.db` in the directory containing `executable`.
///
/// Falls back to a bare relative file name when `executable` has no parent.
pub fn db_path_beside(executable: &Path) -> PathBuf {
    sibling(executable, DB_FILE_NAME)
}

/// Returns `logs/` in the directory containing `executable`.
pub fn log_dir_beside(executable: &Path) -> PathBuf {
    sibling(executable, LOG_DIR_NAME)
}

/// Database path for the current process.
pub fn default_db_path() -> io::Result<PathBuf> {
    Ok(db_path_beside(&std::env::current_exe()?))
}

/// Log directory for the current process. Always absolute.
pub fn default_log_dir() -> io::Result<PathBuf> {
    Ok(log_dir_beside(&std::env::current_exe()?))
}

fn sibling(executable: &Path, name: &str) -> PathBuf {
    match executable.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
