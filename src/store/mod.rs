//! Record Store Module
//!
//! Flat JSON file persistence: each resource is one file holding a JSON array,
//! read in full and rewritten in full on every mutation. There is no locking;
//! concurrent administrative writes are last-writer-wins.

mod api_key;
mod news;
mod property;

pub use api_key::{ApiKeyRecord, ApiKeySummary};
pub use news::NewsArticle;
pub use property::{Market, Property, PropertyImage};

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};

// == Json Store ==
/// A single JSON-array file on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    // == Load ==
    /// Reads and deserializes the whole array.
    ///
    /// A missing file is a NotFound error; a malformed file surfaces as a
    /// generic internal error.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Err(ApiError::NotFound("Data file not found".to_string()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    // == Load Or Default ==
    /// Reads the whole array, treating a missing file as an empty list.
    pub fn load_or_default<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    // == Save ==
    /// Serializes and rewrites the whole array.
    ///
    /// Creates the parent directory on first write.
    pub fn save<T: Serialize>(&self, items: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
