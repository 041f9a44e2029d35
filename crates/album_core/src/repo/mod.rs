//! Storage contract and its backend implementations.
//!
//! # Responsibility
//! - Define the album CRUD contract shared by every backend.
//! - Provide an in-memory and a SQLite backend with identical semantics.
//!
//! # Invariants
//! - Callers cannot tell which backend is active from results or errors.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`)
//!   distinct from backend transport errors.

pub mod album_repo;
pub mod backend;
pub mod memory_repo;
pub mod sqlite_repo;
