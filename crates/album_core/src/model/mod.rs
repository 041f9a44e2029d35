//! Catalog domain model.
//!
//! # Responsibility
//! - Define the data structures shared by storage backends and callers.
//!
//! # Invariants
//! - Every album is identified by a caller-assigned `AlbumId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod album;
