//! Config module tests
//!
//! - Settings file manager (read, backups, cleanup, SettingsStore impl)
//! - Transactions (commit, rollback, first save)
//! - Embedded default dataset

#[cfg(test)]
mod defaults_tests;
