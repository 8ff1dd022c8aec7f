use std::path::Path;

use serde::Deserialize;

use crate::error::StoreError;
use crate::models::{Author, Book, Category};

/// Sample catalog bundled with the binary.
const SAMPLE_CATALOG: &str = include_str!("../seed/catalog.json");

/// Initial catalog content for the in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a seed document from disk
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::SeedIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The bundled sample catalog
    pub fn sample() -> Result<Self, StoreError> {
        Self::from_json(SAMPLE_CATALOG)
    }
}
