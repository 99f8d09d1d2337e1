//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    fixtures::{listings::ListingsFixture, weights::WeightsFixture},
    listings::Listing,
    pricing::PriceError,
    weights::{WeightTable, WeightTableError},
};

pub mod listings;
pub mod weights;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid weight table
    #[error("Invalid weight table: {0}")]
    WeightTable(#[from] WeightTableError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Originals in file order
    originals: Vec<Listing<'static>>,

    /// Editions in file order
    editions: Vec<Listing<'static>>,
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
            originals: Vec::new(),
            editions: Vec::new(),
        }
    }

    /// Load listings from a YAML fixture file, appending to those already loaded
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a price is invalid.
    pub fn load_listings(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("listings").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ListingsFixture = serde_norway::from_str(&contents)?;

        for listing in fixture.originals {
            self.originals.push(listing.try_into_original()?);
        }

        for listing in fixture.editions {
            self.editions.push(listing.try_into_edition()?);
        }

        Ok(self)
    }

    /// Load a weight table from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the table is invalid.
    pub fn load_weights(&self, name: &str) -> Result<WeightTable, FixtureError> {
        let file_path = self.base_path.join("weights").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: WeightsFixture = serde_norway::from_str(&contents)?;

        WeightTable::try_from(fixture)
    }

    /// Load a complete listing set
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_listings(name)?;

        Ok(fixture)
    }

    /// Get all originals
    pub fn originals(&self) -> &[Listing<'static>] {
        &self.originals
    }

    /// Get all editions
    pub fn editions(&self) -> &[Listing<'static>] {
        &self.editions
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
