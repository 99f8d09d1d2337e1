//! Listing Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    listings::{Listing, Marketplace},
    pricing::parse_price,
};

/// Wrapper for listings in YAML
#[derive(Debug, Deserialize)]
pub struct ListingsFixture {
    /// Checks originals
    #[serde(default)]
    pub originals: Vec<ListingFixture>,

    /// Checks editions
    #[serde(default)]
    pub editions: Vec<ListingFixture>,
}

/// Listing fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ListingFixture {
    /// Token id within its collection
    pub token_id: String,

    /// Price string, e.g. "0.42 ETH"
    pub price: String,

    /// Grid size from the token's metadata (originals only)
    #[serde(default)]
    pub checks: Option<u32>,

    /// Marketplace the listing was found on
    #[serde(default)]
    pub source: Marketplace,

    /// Image reference
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ListingFixture {
    /// Convert into an original listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_original(self) -> Result<Listing<'static>, FixtureError> {
        let listing = Listing::original(
            self.token_id,
            parse_price(&self.price)?,
            self.checks,
            self.source,
        );

        Ok(with_image_url(listing, self.image_url))
    }

    /// Convert into an edition listing; `checks` and `source` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_edition(self) -> Result<Listing<'static>, FixtureError> {
        let listing = Listing::edition(self.token_id, parse_price(&self.price)?);

        Ok(with_image_url(listing, self.image_url))
    }
}

fn with_image_url(listing: Listing<'static>, image_url: Option<String>) -> Listing<'static> {
    match image_url {
        Some(url) => listing.with_image_url(url),
        None => listing,
    }
}
