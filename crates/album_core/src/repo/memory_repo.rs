//! In-process album repository.
//!
//! # Responsibility
//! - Hold the catalog in an ordered collection owned by the repository.
//! - Serve as the reference behavior the SQLite backend must match.
//!
//! # Invariants
//! - One mutex guards the whole collection; every operation takes it once.
//! - Collection order is insertion order; update replaces in place.

use crate::model::album::Album;
use crate::repo::album_repo::{AlbumRepository, RepoError, RepoResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Album repository backed by a lock-guarded `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryAlbumRepository {
    albums: Mutex<Vec<Album>>,
}

impl InMemoryAlbumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with `albums`, in order.
    ///
    /// # Errors
    /// - `Validation` when a seed record is malformed.
    /// - `DuplicateId` when the seed repeats an id.
    pub fn with_albums(albums: Vec<Album>) -> RepoResult<Self> {
        let repo = Self::new();
        for album in &albums {
            repo.create(album)?;
        }
        Ok(repo)
    }

    // Every mutation is a single Vec operation, so a panic elsewhere cannot
    // leave the collection half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<Album>> {
        self.albums.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlbumRepository for InMemoryAlbumRepository {
    fn create(&self, album: &Album) -> RepoResult<Album> {
        album.validate()?;

        let mut albums = self.lock();
        if albums.iter().any(|stored| stored.id == album.id) {
            return Err(RepoError::DuplicateId(album.id.clone()));
        }
        albums.push(album.clone());
        Ok(album.clone())
    }

    fn read_all(&self) -> RepoResult<Vec<Album>> {
        Ok(self.lock().clone())
    }

    fn read_one(&self, id: &str) -> RepoResult<Album> {
        self.lock()
            .iter()
            .find(|stored| stored.id == id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, album: &Album) -> RepoResult<Album> {
        let replacement = album.with_id(id);
        replacement.validate()?;

        let mut albums = self.lock();
        let slot = albums
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        *slot = replacement.clone();
        Ok(replacement)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let mut albums = self.lock();
        let index = albums
            .iter()
            .position(|stored| stored.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        albums.remove(index);
        Ok(())
    }
}
