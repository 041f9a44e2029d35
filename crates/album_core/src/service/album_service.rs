//! Album use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to one repository call per operation.
//! - Emit one metadata-only log event per operation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Log lines carry ids and error codes only, never titles or artists.

use crate::model::album::Album;
use crate::repo::album_repo::{AlbumRepository, RepoResult};
use log::{debug, info, warn};

/// Use-case service wrapper for album CRUD operations.
pub struct AlbumService<R: AlbumRepository> {
    repo: R,
}

impl<R: AlbumRepository> AlbumService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new album; duplicate ids are rejected, never overwritten.
    pub fn create_album(&self, album: &Album) -> RepoResult<Album> {
        let result = self.repo.create(album);
        log_outcome("album_create", album.id.as_str(), &result);
        result
    }

    /// Lists every album in insertion order.
    pub fn list_albums(&self) -> RepoResult<Vec<Album>> {
        let result = self.repo.read_all();
        match &result {
            Ok(albums) => debug!(
                "event=album_list module=service status=ok count={}",
                albums.len()
            ),
            Err(err) => warn!(
                "event=album_list module=service status=error error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Gets one album by id.
    pub fn get_album(&self, id: &str) -> RepoResult<Album> {
        let result = self.repo.read_one(id);
        match &result {
            Ok(_) => debug!("event=album_get module=service status=ok id={id}"),
            Err(err) => warn!(
                "event=album_get module=service status=error id={id} error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Replaces the album at `id`; the stored id stays `id`.
    pub fn update_album(&self, id: &str, album: &Album) -> RepoResult<Album> {
        let result = self.repo.update(id, album);
        log_outcome("album_update", id, &result);
        result
    }

    /// Deletes the album at `id`.
    pub fn delete_album(&self, id: &str) -> RepoResult<()> {
        let result = self.repo.delete(id);
        log_outcome("album_delete", id, &result);
        result
    }
}

fn log_outcome<T>(event: &str, id: &str, result: &RepoResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok id={id}"),
        Err(err) => warn!(
            "event={event} module=service status=error id={id} error_code={}",
            err.code()
        ),
    }
}
