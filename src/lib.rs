//! vvalue
//!
//! Market statistics for Checks listings, and a solver for the cheapest set of
//! distinct listings that adds up to exactly one Black Check.

pub mod allocation;
pub mod curation;
pub mod fixtures;
pub mod format;
pub mod listings;
pub mod market;
pub mod pools;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod solvers;
pub mod tiers;
pub mod utils;
pub mod weights;
