//! Fixtures
//!
//! YAML snapshots of document store collections, loaded through the same document boundary as
//! live data. Files live at `{base_path}/{collection}/{name}.yml` and hold a list of documents.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;

use crate::{
    artworks::Artwork,
    categories::MenuItem,
    documents::{Document, DocumentError, FromDocument},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Document rejected at the boundary
    #[error("Invalid document: {0}")]
    Document(#[from] DocumentError),

    /// Artwork not found
    #[error("Artwork not found: {0}")]
    ArtworkNotFound(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded artworks, in file order
    artworks: Vec<Artwork>,

    /// Artwork id -> position in `artworks`
    artwork_keys: FxHashMap<String, usize>,

    /// Loaded menu items, in file order
    menus: Vec<MenuItem>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            artworks: Vec::new(),
            artwork_keys: FxHashMap::default(),
            menus: Vec::new(),
        }
    }

    /// Read and parse every document in a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a document is rejected.
    pub fn documents<T: FromDocument>(&self, name: &str) -> Result<Vec<T>, FixtureError> {
        let file_path = self
            .base_path
            .join(T::COLLECTION)
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let values: Vec<Value> = serde_norway::from_str(&contents)?;

        values
            .into_iter()
            .map(|value| -> Result<T, FixtureError> { Ok(Document::try_from(value)?.parse()?) })
            .collect()
    }

    /// Load artworks from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_artworks(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        for artwork in self.documents::<Artwork>(name)? {
            if self.artwork_keys.contains_key(&artwork.id) {
                continue;
            }

            self.artwork_keys
                .insert(artwork.id.clone(), self.artworks.len());
            self.artworks.push(artwork);
        }

        Ok(self)
    }

    /// Load menu items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_menus(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let menus = self.documents::<MenuItem>(name)?;

        self.menus.extend(menus);

        Ok(self)
    }

    /// Load a complete fixture set (artworks and menus with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_artworks(name)?.load_menus(name)?;

        Ok(fixture)
    }

    /// Get an artwork by id
    ///
    /// # Errors
    ///
    /// Returns an error if the artwork is not found.
    pub fn artwork(&self, id: &str) -> Result<&Artwork, FixtureError> {
        self.artwork_keys
            .get(id)
            .and_then(|position| self.artworks.get(*position))
            .ok_or_else(|| FixtureError::ArtworkNotFound(id.to_string()))
    }

    /// Get all artworks
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// Get all menu items
    pub fn menus(&self) -> &[MenuItem] {
        &self.menus
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
