//! HTTP surface for the album catalog.
//!
//! # Responsibility
//! - Translate HTTP verbs, paths and bodies into album service calls.
//! - Map storage errors to status codes.
//!
//! # Invariants
//! - Handlers never touch storage state except through the injected repository.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use album_core::SharedAlbumRepository;
use axum::Router;

pub use config::{BackendKind, ServerConfig};
pub use error::{ApiError, ErrorResponse};
pub use routes::{album_routes, AlbumState};

/// Builds the full application router around an already-opened repository.
pub fn build_app(repo: SharedAlbumRepository) -> Router {
    album_routes(Arc::new(AlbumState::new(repo)))
}
