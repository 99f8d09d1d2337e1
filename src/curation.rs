//! Curation
//!
//! Builds pools from raw listings, solves for the cheapest 64-unit cover and
//! groups the result into tiers.

use thiserror::Error;
use tracing::{debug, error};

use crate::{
    listings::Listing,
    pools::Pools,
    solvers::{Solver, SolverError, dp::DpSolver},
    tiers::{ConsistencyError, CuratedCover},
    weights::WeightTable,
};

/// Errors that can occur while curating a cover.
#[derive(Debug, Error)]
pub enum CurationError {
    /// The solver failed.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// The solver's cover did not hold together.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Outcome of a curation run.
#[derive(Debug, Clone)]
pub enum Curation<'a> {
    /// The cheapest exact cover, grouped into tiers
    Covered(CuratedCover<'a>),

    /// No combination of the listed tokens adds up to the target
    Unreachable,
}

impl<'a> Curation<'a> {
    /// The curated cover, if there is one.
    pub fn cover(&self) -> Option<&CuratedCover<'a>> {
        match self {
            Curation::Covered(cover) => Some(cover),
            Curation::Unreachable => None,
        }
    }

    /// Returns true when no exact cover exists.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Curation::Unreachable)
    }
}

/// Find the cheapest set of distinct listings worth exactly one Black Check.
///
/// An unreachable target is an ordinary outcome. A cover that fails its
/// consistency checks trips a debug assertion; in release builds it is logged
/// and reported as [`Curation::Unreachable`].
pub fn curate<'a>(
    originals: &'a [Listing<'a>],
    editions: &'a [Listing<'a>],
    table: &WeightTable,
) -> Curation<'a> {
    let result = try_curate(originals, editions, table);

    if let Err(err) = &result {
        error!(%err, "discarding inconsistent cover");
    }

    debug_assert!(result.is_ok(), "curation failed: {result:?}");

    result.unwrap_or(Curation::Unreachable)
}

/// Find the cheapest set of distinct listings worth exactly one Black Check.
///
/// # Errors
///
/// Returns a [`CurationError`] if the solver fails or its cover fails the
/// tier consistency checks.
#[tracing::instrument(
    name = "curation.try_curate",
    skip_all,
    fields(
        originals = originals.len(),
        editions = editions.len(),
        target = table.target(),
        rejected = tracing::field::Empty
    ),
    err
)]
pub fn try_curate<'a>(
    originals: &'a [Listing<'a>],
    editions: &'a [Listing<'a>],
    table: &WeightTable,
) -> Result<Curation<'a>, CurationError> {
    let pools = Pools::build(originals, editions, table);

    tracing::Span::current().record("rejected", pools.rejected().len());

    let Some(cover) = DpSolver::solve(&pools, table.target())? else {
        debug!(listings = pools.listing_count(), "no exact cover");

        return Ok(Curation::Unreachable);
    };

    let curated = CuratedCover::from_cover(&cover, table)?;

    debug!(
        picks = curated.len(),
        tiers = curated.tiers().len(),
        total = %curated.total(),
        "curated cover"
    );

    Ok(Curation::Covered(curated))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        listings::Marketplace,
        pricing::eth,
        tiers::{Tier, TierKey},
        weights::{WeightClass, WeightTable},
    };

    use super::*;

    fn original(token_id: &str, price: Decimal, checks: u32) -> Listing<'static> {
        Listing::original(token_id, eth(price), Some(checks), Marketplace::OpenSea)
    }

    #[test]
    fn curate_mixes_editions_and_originals() -> TestResult {
        let originals: Vec<Listing<'static>> = (0..31)
            .map(|i| original(&format!("o{i}"), Decimal::new(30, 2), 40))
            .collect();

        let editions = [
            Listing::edition("1", eth(Decimal::new(10, 2))),
            Listing::edition("2", eth(Decimal::new(20, 2))),
        ];

        let table = WeightTable::checks();
        let curation = try_curate(&originals, &editions, &table)?;
        let cover = curation.cover().ok_or("expected a cover")?;

        let editions_tier = cover.tier(TierKey::Editions).ok_or("expected editions")?;
        let forty = cover.tier(TierKey::Checks(40)).ok_or("expected 40 checks")?;

        assert_eq!(editions_tier.count(), 2);
        assert_eq!(forty.count(), 31);
        assert_eq!(*cover.total().amount(), Decimal::new(960, 2));

        Ok(())
    }

    #[test]
    fn curate_reports_unreachable_for_thin_inventory() {
        let originals = [original("1", Decimal::ONE, 40)];

        let curation = curate(&originals, &[], &WeightTable::checks());

        assert!(curation.is_unreachable());
        assert!(curation.cover().is_none());
    }

    #[test]
    fn curate_uses_custom_table() -> TestResult {
        let table = WeightTable::new(
            2,
            [WeightClass::new(2, 1), WeightClass::new(1, 2)],
            2,
        )?;

        let originals = [
            original("pair", Decimal::from(3), 1),
            original("a", Decimal::ONE, 2),
            original("b", Decimal::ONE, 2),
        ];

        let curation = curate(&originals, &[], &table);
        let cover = curation.cover().ok_or("expected a cover")?;

        let labels: Vec<String> = cover.tiers().iter().map(Tier::label).collect();

        assert_eq!(labels, vec!["2 checks"]);
        assert_eq!(*cover.total().amount(), Decimal::TWO);

        Ok(())
    }
}
