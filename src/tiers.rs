//! Tiers
//!
//! Groups the picks of a cover by weight class for display and re-checks the
//! cover on the way through.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, crypto::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    listings::{Listing, ListingId},
    pricing::{TotalPriceError, total_price},
    solvers::Cover,
    weights::WeightTable,
};

/// A cover that does not hold together.
///
/// Any of these means the solver handed back a selection it should never
/// have produced.
#[derive(Debug, Error, PartialEq)]
pub enum ConsistencyError {
    /// The sum of member prices differs from the solver's total.
    #[error("cover total {reported} does not match member prices {derived}")]
    CostMismatch {
        /// Total reported by the solver
        reported: Decimal,

        /// Total re-derived from the picks
        derived: Decimal,
    },

    /// The same token was picked twice.
    #[error("listing {0} appears more than once in the cover")]
    DuplicateListing(ListingId),

    /// The picks do not add up to the target.
    #[error("cover has {actual} units, expected {expected}")]
    UnitMismatch {
        /// Units required by the weight table
        expected: usize,

        /// Units covered by the picks
        actual: usize,
    },

    /// Re-deriving the total failed.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Display grouping of a cover's picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKey {
    /// Edition listings, whatever class they were folded into
    Editions,

    /// Originals of one grid size
    Checks(u32),
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierKey::Editions => f.write_str("Editions"),
            TierKey::Checks(checks) => write!(f, "{checks} checks"),
        }
    }
}

/// Picks of one tier, in the order the solver made them.
#[derive(Debug, Clone)]
pub struct Tier<'a> {
    key: TierKey,
    listings: Vec<&'a Listing<'a>>,
}

impl<'a> Tier<'a> {
    /// Tier key.
    pub fn key(&self) -> TierKey {
        self.key
    }

    /// Human-facing label, e.g. `"Editions"` or `"40 checks"`.
    pub fn label(&self) -> String {
        self.key.to_string()
    }

    /// Number of listings in the tier.
    pub fn count(&self) -> usize {
        self.listings.len()
    }

    /// Listings in the tier.
    pub fn listings(&self) -> &[&'a Listing<'a>] {
        &self.listings
    }
}

/// Cheapest cover, grouped into tiers.
#[derive(Debug, Clone)]
pub struct CuratedCover<'a> {
    total: Money<'a, Currency>,
    tiers: SmallVec<[Tier<'a>; 8]>,
}

impl<'a> CuratedCover<'a> {
    /// Group a cover into tiers: editions first, then originals by descending
    /// grid size. Tiers without listings are left out.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsistencyError`] if a token was picked twice, the picks do
    /// not cover the table's target, or their prices do not add up to the
    /// cover's total.
    pub fn from_cover(cover: &Cover<'a>, table: &WeightTable) -> Result<Self, ConsistencyError> {
        let mut seen = FxHashSet::default();

        if let Some(pick) = cover.picks.iter().find(|pick| !seen.insert(pick.listing.id())) {
            return Err(ConsistencyError::DuplicateListing(pick.listing.id().clone()));
        }

        let units = cover.units();

        if units != table.target() {
            return Err(ConsistencyError::UnitMismatch {
                expected: table.target(),
                actual: units,
            });
        }

        let total = total_price(cover.picks.iter().map(|pick| pick.listing))?;

        if total.amount() != cover.total.amount() {
            return Err(ConsistencyError::CostMismatch {
                reported: *cover.total.amount(),
                derived: *total.amount(),
            });
        }

        let keys = std::iter::once(TierKey::Editions).chain(
            table
                .display_order()
                .into_iter()
                .map(TierKey::Checks),
        );

        let tiers = keys
            .map(|key| Tier {
                key,
                listings: cover
                    .picks
                    .iter()
                    .filter(|pick| match key {
                        TierKey::Editions => pick.listing.is_edition(),
                        TierKey::Checks(checks) => {
                            !pick.listing.is_edition() && pick.class.checks == checks
                        }
                    })
                    .map(|pick| pick.listing)
                    .collect(),
            })
            .filter(|tier| !tier.listings.is_empty())
            .collect();

        Ok(Self { total, tiers })
    }

    /// Sum of the member prices.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Tiers in display order.
    pub fn tiers(&self) -> &[Tier<'a>] {
        &self.tiers
    }

    /// Tier for a key, if the cover has any listings in it.
    pub fn tier(&self, key: TierKey) -> Option<&Tier<'a>> {
        self.tiers.iter().find(|tier| tier.key == key)
    }

    /// Every listing of the cover, tier by tier.
    pub fn listings(&self) -> impl Iterator<Item = &'a Listing<'a>> + '_ {
        self.tiers
            .iter()
            .flat_map(|tier| tier.listings.iter().copied())
    }

    /// Number of listings in the cover.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Tier::count).sum()
    }

    /// Check if the cover has no listings.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        listings::Marketplace,
        pricing::eth,
        solvers::Pick,
        weights::{WeightClass, WeightTable},
    };

    use super::*;

    fn original(token_id: &str, price: i64, checks: u32) -> Listing<'static> {
        Listing::original(
            token_id,
            eth(Decimal::from(price)),
            Some(checks),
            Marketplace::OpenSea,
        )
    }

    fn small_table() -> Result<WeightTable, crate::weights::WeightTableError> {
        WeightTable::new(
            4,
            [
                WeightClass::new(4, 1),
                WeightClass::new(2, 2),
                WeightClass::new(1, 4),
            ],
            4,
        )
    }

    fn pick<'a>(listing: &'a Listing<'a>, table: &WeightTable) -> Pick<'a> {
        let checks = listing.checks().unwrap_or(table.edition_class());
        let units = table.units_for(checks).unwrap_or_default();

        Pick {
            listing,
            class: WeightClass::new(checks, units),
        }
    }

    fn cover<'a>(listings: &'a [Listing<'a>], total: i64, table: &WeightTable) -> Cover<'a> {
        Cover {
            total: eth(Decimal::from(total)),
            picks: listings.iter().map(|listing| pick(listing, table)).collect(),
        }
    }

    #[test]
    fn editions_are_pinned_first_then_largest_grid() -> TestResult {
        let table = small_table()?;
        let listings = [
            original("a", 1, 4),
            original("b", 2, 2),
            Listing::edition("c", eth(Decimal::ONE)),
        ];

        let curated = CuratedCover::from_cover(&cover(&listings, 4, &table), &table)?;

        let labels: Vec<String> = curated.tiers().iter().map(Tier::label).collect();
        let counts: Vec<usize> = curated.tiers().iter().map(Tier::count).collect();

        assert_eq!(labels, vec!["Editions", "4 checks", "2 checks"]);
        assert_eq!(counts, vec![1, 1, 1]);
        assert_eq!(*curated.total().amount(), Decimal::from(4));
        assert_eq!(curated.len(), 3);

        Ok(())
    }

    #[test]
    fn tiers_keep_selection_order() -> TestResult {
        let table = small_table()?;
        let listings = [
            original("late", 3, 4),
            original("early", 1, 4),
            original("pair", 2, 2),
        ];

        let curated = CuratedCover::from_cover(&cover(&listings, 6, &table), &table)?;

        let tier = curated
            .tier(TierKey::Checks(4))
            .ok_or("expected a 4 checks tier")?;
        let ids: Vec<&str> = tier.listings().iter().map(|l| l.token_id()).collect();

        assert_eq!(ids, vec!["late", "early"]);
        assert!(curated.tier(TierKey::Editions).is_none());
        assert!(curated.tier(TierKey::Checks(1)).is_none());

        Ok(())
    }

    #[test]
    fn rejects_cost_mismatch() -> TestResult {
        let table = small_table()?;
        let listings = [original("whole", 5, 1)];

        let result = CuratedCover::from_cover(&cover(&listings, 4, &table), &table);

        assert_eq!(
            result.err(),
            Some(ConsistencyError::CostMismatch {
                reported: Decimal::from(4),
                derived: Decimal::from(5),
            })
        );

        Ok(())
    }

    #[test]
    fn rejects_duplicate_listing() -> TestResult {
        let table = small_table()?;
        let listings = [
            original("a", 1, 2),
            original("a", 1, 2),
        ];

        let result = CuratedCover::from_cover(&cover(&listings, 2, &table), &table);

        assert!(matches!(
            result,
            Err(ConsistencyError::DuplicateListing(id)) if id.token_id() == "a"
        ));

        Ok(())
    }

    #[test]
    fn rejects_short_cover() -> TestResult {
        let table = small_table()?;
        let listings = [original("a", 1, 2)];

        let result = CuratedCover::from_cover(&cover(&listings, 1, &table), &table);

        assert_eq!(
            result.err(),
            Some(ConsistencyError::UnitMismatch {
                expected: 4,
                actual: 2,
            })
        );

        Ok(())
    }

    #[test]
    fn tier_key_labels() {
        assert_eq!(TierKey::Editions.to_string(), "Editions");
        assert_eq!(TierKey::Checks(80).to_string(), "80 checks");
    }
}
