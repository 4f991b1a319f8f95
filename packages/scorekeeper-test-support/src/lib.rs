//! Scorekeeper test support utilities
//!
//! Shared by unit and integration tests: one logging initializer, unique
//! ids for isolation, and throwaway SQLite files.

pub mod logging;
pub mod sqlite_file;
pub mod unique_helpers;
