//! Core storage logic for the album catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::album::{seed_albums, Album, AlbumId, AlbumValidationError};
pub use repo::album_repo::{AlbumRepository, RepoError, RepoErrorKind, RepoResult};
pub use repo::backend::{open_repository, SharedAlbumRepository, StorageBackend};
pub use repo::memory_repo::InMemoryAlbumRepository;
pub use repo::sqlite_repo::SqliteAlbumRepository;
pub use service::album_service::AlbumService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
