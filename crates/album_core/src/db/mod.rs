//! SQLite storage bootstrap for the durable backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Ensure the `albums` table exists before any data access.
//!
//! # Invariants
//! - Core code must not read/write album rows before the schema is ensured.
//! - Schema creation is idempotent (`CREATE TABLE IF NOT EXISTS`).

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{ensure_schema, open_db, open_db_in_memory};

/// Name of the single table holding catalog rows.
pub const ALBUMS_TABLE: &str = "albums";

/// Columns every usable `albums` table must carry.
pub const ALBUMS_COLUMNS: &[&str] = &["id", "title", "artist", "price"];

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
