//! Album storage contract and its error taxonomy.
//!
//! # Responsibility
//! - Define the five CRUD operations every backend implements.
//! - Define the semantic errors callers match on, independent of backend.
//!
//! # Invariants
//! - `create` never overwrites: an existing id yields `DuplicateId`.
//! - `update` keeps the addressed id; the id inside the new record is ignored.
//! - Transport failures surface as `BackendUnavailable`, never as `NotFound`.
//! - Write paths must call `Album::validate()` before mutating storage.

use crate::db::DbError;
use crate::model::album::{Album, AlbumId, AlbumValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for album persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(AlbumValidationError),
    NotFound(AlbumId),
    DuplicateId(AlbumId),
    BackendUnavailable(DbError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    MissingPrimaryKey {
        table: &'static str,
        column: &'static str,
    },
}

/// Coarse error classes used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoErrorKind {
    NotFound,
    DuplicateId,
    InvalidInput,
    BackendUnavailable,
    Internal,
}

impl RepoError {
    pub fn kind(&self) -> RepoErrorKind {
        match self {
            Self::Validation(_) => RepoErrorKind::InvalidInput,
            Self::NotFound(_) => RepoErrorKind::NotFound,
            Self::DuplicateId(_) => RepoErrorKind::DuplicateId,
            Self::BackendUnavailable(_) => RepoErrorKind::BackendUnavailable,
            Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::MissingPrimaryKey { .. } => RepoErrorKind::Internal,
        }
    }

    /// Stable snake_case code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::DuplicateId(_) => "duplicate_id",
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::InvalidData(_) => "invalid_data",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::MissingRequiredColumn { .. } => "missing_column",
            Self::MissingPrimaryKey { .. } => "missing_primary_key",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "album not found: {id}"),
            Self::DuplicateId(id) => write!(f, "album already exists: {id}"),
            Self::BackendUnavailable(err) => write!(f, "storage backend unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted album data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
            Self::MissingPrimaryKey { table, column } => {
                write!(f, "column `{table}.{column}` is not a unique key")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::BackendUnavailable(err) => Some(err),
            Self::NotFound(_)
            | Self::DuplicateId(_)
            | Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::MissingPrimaryKey { .. } => None,
        }
    }
}

impl From<AlbumValidationError> for RepoError {
    fn from(value: AlbumValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::BackendUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::BackendUnavailable(DbError::Sqlite(value))
    }
}

/// Storage contract for the album catalog.
///
/// Implementations are shared across request workers, so every method takes
/// `&self` and must be safe to call concurrently.
pub trait AlbumRepository: Send + Sync {
    /// Inserts `album`; fails with `DuplicateId` if its id is taken.
    fn create(&self, album: &Album) -> RepoResult<Album>;

    /// Returns an owned snapshot of every album in insertion order.
    fn read_all(&self) -> RepoResult<Vec<Album>>;

    /// Looks up one album by exact id.
    fn read_one(&self, id: &str) -> RepoResult<Album>;

    /// Replaces title, artist and price of the album at `id`.
    fn update(&self, id: &str, album: &Album) -> RepoResult<Album>;

    /// Removes the album at `id`.
    fn delete(&self, id: &str) -> RepoResult<()>;
}

impl<R: AlbumRepository + ?Sized> AlbumRepository for Arc<R> {
    fn create(&self, album: &Album) -> RepoResult<Album> {
        (**self).create(album)
    }

    fn read_all(&self) -> RepoResult<Vec<Album>> {
        (**self).read_all()
    }

    fn read_one(&self, id: &str) -> RepoResult<Album> {
        (**self).read_one(id)
    }

    fn update(&self, id: &str, album: &Album) -> RepoResult<Album> {
        (**self).update(id, album)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        (**self).delete(id)
    }
}
