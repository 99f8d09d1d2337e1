//! Listings

use std::fmt;

use rusty_money::{Money, crypto::Currency};
use serde::Deserialize;

/// The collection a token was minted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Checks originals (each token carries its own grid size)
    Originals,

    /// Checks editions (always counted as the smallest share)
    Editions,
}

/// Marketplace a listing was found on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    /// `OpenSea` order book
    #[default]
    OpenSea,

    /// `TokenWorks` vault sale
    TokenWorks,
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marketplace::OpenSea => f.write_str("opensea"),
            Marketplace::TokenWorks => f.write_str("tokenworks"),
        }
    }
}

/// Identifies one physical token; unique across both collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId {
    collection: Collection,
    token_id: String,
}

impl ListingId {
    /// Create a new listing identifier.
    pub fn new(collection: Collection, token_id: impl Into<String>) -> Self {
        Self {
            collection,
            token_id: token_id.into(),
        }
    }

    /// Collection of the token.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Token id within its collection.
    pub fn token_id(&self) -> &str {
        &self.token_id
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.collection {
            Collection::Originals => write!(f, "#{}", self.token_id),
            Collection::Editions => write!(f, "Edition #{}", self.token_id),
        }
    }
}

/// A priced token listed for sale.
///
/// `image_url` and `source` are carried through to the report untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    id: ListingId,
    price: Money<'a, Currency>,
    checks: Option<u32>,
    source: Marketplace,
    image_url: Option<String>,
}

impl<'a> Listing<'a> {
    /// Creates an original listing with its declared grid size.
    pub fn original(
        token_id: impl Into<String>,
        price: Money<'a, Currency>,
        checks: Option<u32>,
        source: Marketplace,
    ) -> Self {
        Self {
            id: ListingId::new(Collection::Originals, token_id),
            price,
            checks,
            source,
            image_url: None,
        }
    }

    /// Creates an edition listing; editions are only sold on `OpenSea`.
    pub fn edition(token_id: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id: ListingId::new(Collection::Editions, token_id),
            price,
            checks: None,
            source: Marketplace::OpenSea,
            image_url: None,
        }
    }

    /// Attaches an image reference.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Unique identifier of the listed token.
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Token id within its collection.
    pub fn token_id(&self) -> &str {
        self.id.token_id()
    }

    /// Collection of the listed token.
    pub fn collection(&self) -> Collection {
        self.id.collection()
    }

    /// Returns true for edition listings.
    pub fn is_edition(&self) -> bool {
        self.id.collection() == Collection::Editions
    }

    /// Asking price.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Declared grid size, if the token's metadata had one.
    pub fn checks(&self) -> Option<u32> {
        self.checks
    }

    /// Marketplace the listing came from.
    pub fn source(&self) -> Marketplace {
        self.source
    }

    /// Image reference, if known.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
