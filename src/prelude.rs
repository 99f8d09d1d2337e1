//! vvalue prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    allocation::Allocation,
    curation::{Curation, CurationError, curate, try_curate},
    fixtures::{Fixture, FixtureError},
    format::format_eth,
    listings::{Collection, Listing, ListingId, Marketplace},
    market::{MarketSummary, SWEEP_SIZE, SweepValues, market_value, per_check, sweep_value},
    pools::{Pool, Pools, Rejected, Rejection},
    pricing::{PriceError, TotalPriceError, eth, parse_price, total_price},
    report::ReportError,
    solvers::{
        Cover, Pick, Solver, SolverError, dp::DpSolver, exhaustive::ExhaustiveSolver,
    },
    tiers::{ConsistencyError, CuratedCover, Tier, TierKey},
    weights::{BLACK_CHECK_UNITS, WeightClass, WeightTable, WeightTableError},
};
