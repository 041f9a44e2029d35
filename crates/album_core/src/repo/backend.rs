//! Startup-time backend selection.
//!
//! The repository is chosen once and injected into callers as a
//! `SharedAlbumRepository`; nothing swaps it afterwards.

use crate::model::album::seed_albums;
use crate::repo::album_repo::{AlbumRepository, RepoResult};
use crate::repo::memory_repo::InMemoryAlbumRepository;
use crate::repo::sqlite_repo::SqliteAlbumRepository;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Repository handle shared across request workers.
pub type SharedAlbumRepository = Arc<dyn AlbumRepository>;

/// Which storage backend to open, and whether to load the demo catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory { seed: bool },
    Sqlite { path: PathBuf, seed: bool },
}

impl StorageBackend {
    /// Short backend name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory { .. } => "memory",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// Opens the configured backend.
///
/// # Errors
/// - Any SQLite open or schema failure; callers treat this as fatal.
pub fn open_repository(backend: &StorageBackend) -> RepoResult<SharedAlbumRepository> {
    let repo: SharedAlbumRepository = match backend {
        StorageBackend::Memory { seed } => {
            let albums = if *seed { seed_albums() } else { Vec::new() };
            Arc::new(InMemoryAlbumRepository::with_albums(albums)?)
        }
        StorageBackend::Sqlite { path, seed } => {
            let repo = SqliteAlbumRepository::open(path)?;
            if *seed {
                let inserted = repo.seed(&seed_albums())?;
                info!("event=repo_seed module=repo status=ok backend=sqlite inserted={inserted}");
            }
            Arc::new(repo)
        }
    };

    info!(
        "event=repo_ready module=repo status=ok backend={}",
        backend.name()
    );
    Ok(repo)
}
