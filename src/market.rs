//! Market Statistics
//!
//! Figures the dashboard shows next to the curated cover: the market value of
//! a single-check original, and what sweeping the cheapest listings of each
//! collection would cost.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    crypto::{Currency, ETH},
};

use crate::{
    curation::{Curation, curate},
    listings::{Listing, Marketplace},
    pricing::eth,
    weights::WeightTable,
};

/// Number of listings bought in a sweep.
pub const SWEEP_SIZE: usize = 64;

/// The cheapest original with a single check on its grid.
pub fn market_value<'l, 'a>(originals: &'l [Listing<'a>]) -> Option<&'l Listing<'a>> {
    originals
        .iter()
        .filter(|listing| !listing.is_edition() && listing.checks() == Some(1))
        .min_by(|a, b| a.price().amount().cmp(b.price().amount()))
}

/// Sum of the `n` cheapest ETH prices among `listings`.
///
/// Fewer than `n` listings are summed as they are; no listings cost zero.
pub fn sweep_value<'l, 'a: 'l>(
    listings: impl IntoIterator<Item = &'l Listing<'a>>,
    n: usize,
) -> Money<'static, Currency> {
    let mut amounts: Vec<Decimal> = listings
        .into_iter()
        .filter(|listing| listing.price().currency() == ETH)
        .map(|listing| *listing.price().amount())
        .collect();

    amounts.sort_unstable();

    eth(amounts.into_iter().take(n).sum())
}

/// Sweep values per collection and marketplace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepValues {
    /// Cheapest editions
    pub editions: Money<'static, Currency>,

    /// Cheapest originals listed on `OpenSea`
    pub opensea: Money<'static, Currency>,

    /// Cheapest originals held for sale by `TokenWorks`
    pub tokenworks: Money<'static, Currency>,
}

impl SweepValues {
    /// Sweep the `n` cheapest listings of each collection and marketplace.
    pub fn compute(originals: &[Listing<'_>], editions: &[Listing<'_>], n: usize) -> Self {
        let from = |source: Marketplace| {
            sweep_value(
                originals
                    .iter()
                    .filter(move |listing| listing.source() == source),
                n,
            )
        };

        Self {
            editions: sweep_value(editions, n),
            opensea: from(Marketplace::OpenSea),
            tokenworks: from(Marketplace::TokenWorks),
        }
    }
}

/// A value covering the whole target, expressed per single-check unit.
///
/// Returns `None` if the division overflows.
pub fn per_check<'a>(
    value: &Money<'a, Currency>,
    table: &WeightTable,
) -> Option<Money<'a, Currency>> {
    let amount = value.amount().checked_div(Decimal::from(table.target()))?;

    Some(Money::from_decimal(amount, value.currency()))
}

/// Everything the dashboard reports for one snapshot of listings.
#[derive(Debug, Clone)]
pub struct MarketSummary<'a> {
    /// Cheapest single-check original
    pub market_value: Option<&'a Listing<'a>>,

    /// Cost of sweeping each collection
    pub sweeps: SweepValues,

    /// Cheapest exact cover
    pub curation: Curation<'a>,
}

impl<'a> MarketSummary<'a> {
    /// Compute every dashboard figure from the same listings.
    pub fn compute(
        originals: &'a [Listing<'a>],
        editions: &'a [Listing<'a>],
        table: &WeightTable,
    ) -> Self {
        Self {
            market_value: market_value(originals),
            sweeps: SweepValues::compute(originals, editions, SWEEP_SIZE),
            curation: curate(originals, editions, table),
        }
    }

    /// Price of the curated cover per single-check unit.
    pub fn curated_per_check(&self, table: &WeightTable) -> Option<Money<'a, Currency>> {
        let cover = self.curation.cover()?;

        per_check(&cover.total(), table)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn original(token_id: &str, price: i64, checks: u32, source: Marketplace) -> Listing<'static> {
        Listing::original(token_id, eth(Decimal::new(price, 2)), Some(checks), source)
    }

    #[test]
    fn market_value_is_cheapest_single_check() {
        let originals = [
            original("1", 50, 80, Marketplace::OpenSea),
            original("2", 900, 1, Marketplace::OpenSea),
            original("3", 700, 1, Marketplace::TokenWorks),
        ];

        let cheapest = market_value(&originals).map(Listing::token_id);

        assert_eq!(cheapest, Some("3"));
    }

    #[test]
    fn market_value_without_single_checks_is_none() {
        let originals = [original("1", 50, 80, Marketplace::OpenSea)];

        assert!(market_value(&originals).is_none());
    }

    #[test]
    fn sweep_value_sums_cheapest_n() {
        let editions: Vec<Listing<'static>> = [30, 10, 20, 40]
            .into_iter()
            .map(|price| Listing::edition(price.to_string(), eth(Decimal::new(price, 2))))
            .collect();

        assert_eq!(*sweep_value(&editions, 3).amount(), Decimal::new(60, 2));
        assert_eq!(*sweep_value(&editions, 64).amount(), Decimal::ONE);
        assert_eq!(*sweep_value(&editions, 0).amount(), Decimal::ZERO);
    }

    #[test]
    fn sweep_value_of_nothing_is_zero() {
        let listings: [Listing<'static>; 0] = [];

        assert_eq!(*sweep_value(&listings, SWEEP_SIZE).amount(), Decimal::ZERO);
    }

    #[test]
    fn sweep_values_split_originals_by_marketplace() {
        let originals = [
            original("1", 100, 80, Marketplace::OpenSea),
            original("2", 200, 40, Marketplace::TokenWorks),
            original("3", 300, 20, Marketplace::OpenSea),
        ];

        let editions = [Listing::edition("9", eth(Decimal::new(5, 2)))];

        let sweeps = SweepValues::compute(&originals, &editions, SWEEP_SIZE);

        assert_eq!(*sweeps.editions.amount(), Decimal::new(5, 2));
        assert_eq!(*sweeps.opensea.amount(), Decimal::new(400, 2));
        assert_eq!(*sweeps.tokenworks.amount(), Decimal::new(200, 2));
    }

    #[test]
    fn per_check_divides_by_target() -> TestResult {
        let value = eth(Decimal::from(32));

        let single = per_check(&value, &WeightTable::checks()).ok_or("expected a value")?;

        assert_eq!(*single.amount(), Decimal::new(5, 1));

        Ok(())
    }

    #[test]
    fn summary_collects_every_figure() -> TestResult {
        let originals = [
            original("1", 500, 1, Marketplace::OpenSea),
            original("2", 700, 1, Marketplace::TokenWorks),
        ];

        let table = WeightTable::checks();
        let summary = MarketSummary::compute(&originals, &[], &table);

        assert_eq!(summary.market_value.map(Listing::token_id), Some("1"));
        assert_eq!(*summary.sweeps.opensea.amount(), Decimal::from(5));
        assert_eq!(*summary.sweeps.tokenworks.amount(), Decimal::from(7));

        let per_check = summary
            .curated_per_check(&table)
            .ok_or("expected a cover")?;

        assert_eq!(*per_check.amount(), Decimal::new(78125, 6));

        Ok(())
    }
}
