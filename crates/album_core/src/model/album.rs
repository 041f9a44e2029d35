//! Album domain model.
//!
//! # Responsibility
//! - Define the catalog record shared by every storage backend.
//! - Provide the write-path validation all backends apply.
//!
//! # Invariants
//! - `id` is assigned by the caller and is never generated by storage.
//! - `price` is a finite, non-negative amount with no implied currency.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-assigned album identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AlbumId = String;

/// Catalog record for one album.
///
/// Serialized as `{"id", "title", "artist", "price"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Unique among all stored albums at any instant. May be omitted in
    /// update bodies, where the addressed id wins anyway.
    #[serde(default)]
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    /// Monetary amount, no currency unit implied.
    pub price: f64,
}

/// Validation errors for album write paths.
#[derive(Debug, Clone, PartialEq)]
pub enum AlbumValidationError {
    EmptyId,
    NegativePrice(f64),
    NonFinitePrice,
}

impl Display for AlbumValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "album id cannot be empty"),
            Self::NegativePrice(price) => {
                write!(f, "album price must be non-negative, got {price}")
            }
            Self::NonFinitePrice => write!(f, "album price must be a finite number"),
        }
    }
}

impl Error for AlbumValidationError {}

impl Album {
    /// Creates an album with a caller-provided id.
    pub fn new(
        id: impl Into<AlbumId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    /// Validates record invariants before persistence.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty or whitespace only.
    /// - `NonFinitePrice` when `price` is NaN or infinite.
    /// - `NegativePrice` when `price < 0`.
    pub fn validate(&self) -> Result<(), AlbumValidationError> {
        if self.id.trim().is_empty() {
            return Err(AlbumValidationError::EmptyId);
        }
        if !self.price.is_finite() {
            return Err(AlbumValidationError::NonFinitePrice);
        }
        if self.price < 0.0 {
            return Err(AlbumValidationError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Returns a copy carrying `id` in place of this record's own id.
    ///
    /// Used by update paths, where the addressed id is authoritative.
    pub fn with_id(&self, id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..self.clone()
        }
    }
}

/// Demo catalog loaded when a backend is opened with seeding enabled.
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album::new("1", "Blue Train", "John Coltrane", 56.99),
        Album::new("2", "Jeru", "Gerry Mulligan", 17.99),
        Album::new(
            "3",
            "Sarah Vaughan and Clifford Brown",
            "Sarah Vaughan",
            39.99,
        ),
    ]
}
