//! Storage bootstrap for the veterinarian store.
//!
//! # Responsibility
//! - Open SQLite connections and bring the `veterinarians` schema up to date.
//! - Load the deterministic seed set used by tests and demos.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Repositories only see connections whose migrations succeeded.
//! - A failed fixture load leaves no partially seeded rows behind.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fixtures;
pub mod migrations;
mod open;

pub use open::{open_configured, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Bootstrap-level storage error.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Writing one seed row failed; the whole fixture transaction was rolled back.
    FixtureLoad {
        seed_id: i64,
        source: rusqlite::Error,
    },
}

impl DbError {
    /// Stable value for the `error_code=` field of log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::UnsupportedSchemaVersion { .. } => "unsupported_schema_version",
            Self::FixtureLoad { .. } => "fixture_load_failed",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "veterinarian store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::FixtureLoad { seed_id, source } => {
                write!(f, "failed to load seed veterinarian {seed_id}: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::FixtureLoad { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
