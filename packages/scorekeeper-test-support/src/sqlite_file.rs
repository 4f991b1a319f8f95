//! SQLite database files that disappear with the test.

use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

/// A temp directory holding one SQLite file. Keep it alive for as long as
/// the database is in use.
pub struct TempSqlite {
    dir: TempDir,
}

impl TempSqlite {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("scorekeeper.sqlite")
    }

    /// Path as a string, for `DbProfile::SqliteFile`.
    pub fn file(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }
}
