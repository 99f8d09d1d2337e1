//! Pools
//!
//! Listings grouped by weight class, cheapest first.

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::crypto::ETH;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    listings::{Listing, ListingId},
    weights::{WeightClass, WeightTable},
};

/// Why a listing could not be placed in any pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The original has no grid size in its metadata.
    MissingClass,

    /// The declared grid size is not in the weight table.
    UnknownClass(u32),

    /// The asking price is below zero.
    NegativePrice,

    /// The asking price is not in ETH.
    CurrencyMismatch,

    /// The same token was already placed in a pool of another class.
    DuplicateListing,
}

/// A listing left out of the pools, with the reason.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rejected<'a> {
    /// The listing that was dropped
    pub listing: &'a Listing<'a>,

    /// Why it was dropped
    pub reason: Rejection,
}

/// Listings sharing one weight class, ordered by ascending price.
///
/// Equal prices keep input order, with originals ahead of editions.
#[derive(Debug, Clone)]
pub struct Pool<'a> {
    class: WeightClass,
    listings: Vec<&'a Listing<'a>>,
}

impl<'a> Pool<'a> {
    fn new(class: WeightClass) -> Self {
        Self {
            class,
            listings: Vec::new(),
        }
    }

    /// Weight class of every listing in the pool.
    pub fn class(&self) -> WeightClass {
        self.class
    }

    /// Denomination of the pool.
    pub fn checks(&self) -> u32 {
        self.class.checks
    }

    /// Units one listing of this pool contributes.
    pub fn units(&self) -> usize {
        self.class.units
    }

    /// Iterate over listings, cheapest first.
    pub fn iter(&self) -> impl Iterator<Item = &'a Listing<'a>> + '_ {
        self.listings.iter().copied()
    }

    /// Number of listings in the pool.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Cheapest listing whose identifier is not in `used`, with its price rank.
    pub fn first_unused(&self, used: &FxHashSet<&ListingId>) -> Option<(usize, &'a Listing<'a>)> {
        self.listings
            .iter()
            .copied()
            .enumerate()
            .find(|(_, listing)| !used.contains(listing.id()))
    }
}

/// One pool per weight class, in the table's declared order.
#[derive(Debug, Clone)]
pub struct Pools<'a> {
    pools: SmallVec<[Pool<'a>; 8]>,
    rejected: Vec<Rejected<'a>>,
}

impl<'a> Pools<'a> {
    /// Classify originals by their declared grid size and fold editions into
    /// the table's edition class, then sort every pool by price.
    ///
    /// Listings that cannot take part in a cover are dropped and recorded in
    /// [`Pools::rejected`]; they never abort the build. A token listed again
    /// under a different class keeps only its first placement, so every
    /// identifier lives in one pool.
    pub fn build(
        originals: &'a [Listing<'a>],
        editions: &'a [Listing<'a>],
        table: &WeightTable,
    ) -> Self {
        let mut pools: SmallVec<[Pool<'a>; 8]> =
            table.classes().iter().copied().map(Pool::new).collect();

        let mut rejected = Vec::new();

        let originals = originals
            .iter()
            .map(|listing| (listing, listing.checks().ok_or(Rejection::MissingClass)));

        let editions = editions
            .iter()
            .map(|listing| (listing, Ok(table.edition_class())));

        // Pool each identifier was placed in.
        let mut placed: FxHashMap<&'a ListingId, usize> = FxHashMap::default();

        for (listing, declared) in originals.chain(editions) {
            let position = declared
                .and_then(|checks| check_price(listing).map(|()| checks))
                .and_then(|checks| {
                    table
                        .position(checks)
                        .filter(|&idx| idx < pools.len())
                        .ok_or(Rejection::UnknownClass(checks))
                })
                .and_then(|idx| match placed.get(listing.id()) {
                    Some(&first) if first != idx => Err(Rejection::DuplicateListing),
                    _ => Ok(idx),
                });

            match position {
                Ok(idx) => {
                    if let Some(pool) = pools.get_mut(idx) {
                        placed.insert(listing.id(), idx);
                        pool.listings.push(listing);
                    }
                }
                Err(reason) => {
                    debug!(listing = %listing.id(), ?reason, "dropped listing from pools");

                    rejected.push(Rejected { listing, reason });
                }
            }
        }

        for pool in &mut pools {
            pool.listings
                .sort_by(|a, b| a.price().amount().cmp(b.price().amount()));
        }

        Self { pools, rejected }
    }

    /// Iterate over pools in declared class order.
    pub fn iter(&self) -> impl Iterator<Item = &Pool<'a>> {
        self.pools.iter()
    }

    /// Pool for a denomination.
    pub fn pool(&self, checks: u32) -> Option<&Pool<'a>> {
        self.pools.iter().find(|pool| pool.checks() == checks)
    }

    /// Listings that were left out.
    pub fn rejected(&self) -> &[Rejected<'a>] {
        &self.rejected
    }

    /// Total listings placed across all pools.
    pub fn listing_count(&self) -> usize {
        self.pools.iter().map(Pool::len).sum()
    }
}

fn check_price(listing: &Listing<'_>) -> Result<(), Rejection> {
    if listing.price().currency() != ETH {
        return Err(Rejection::CurrencyMismatch);
    }

    if listing.price().amount().is_sign_negative() {
        return Err(Rejection::NegativePrice);
    }

    Ok(())
}
