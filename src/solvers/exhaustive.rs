//! Exhaustive Solver
//!
//! Enumerates how many listings to take from each pool. For a fixed count
//! vector the cheapest choice is always the cheapest distinct listings of each
//! pool, so only count vectors whose units sum to the target need costing.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, crypto::ETH};
use smallvec::{SmallVec, smallvec};

use crate::{
    listings::Listing,
    pools::{Pool, Pools},
    solvers::{Cover, Pick, Solver, SolverError},
};

/// Exact-cover solver that tries every per-pool count combination.
///
/// The work grows with the number of ways to split the target into class
/// units, which stays small for the Checks table. Of several equally cheap
/// combinations the first enumerated wins (fewest listings from the earliest
/// pool).
///
/// Duplicate identifiers are only collapsed within a pool; [`Pools::build`]
/// keeps each identifier in a single pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

/// Distinct listings of one pool with running price totals.
#[derive(Debug)]
struct Candidates<'p, 'a> {
    pool: &'p Pool<'a>,
    listings: Vec<&'a Listing<'a>>,
    /// `prefix[n]` is the price of the `n` cheapest listings.
    prefix: Vec<Decimal>,
}

impl<'p, 'a> Candidates<'p, 'a> {
    fn new(pool: &'p Pool<'a>) -> Self {
        let mut seen = FxHashSet::default();

        let listings: Vec<&'a Listing<'a>> = pool
            .iter()
            .filter(|listing| seen.insert(listing.id()))
            .collect();

        let prefix = std::iter::once(Decimal::ZERO)
            .chain(listings.iter().scan(Decimal::ZERO, |total, listing| {
                *total += *listing.price().amount();
                Some(*total)
            }))
            .collect();

        Self {
            pool,
            listings,
            prefix,
        }
    }
}

#[derive(Debug)]
struct Search<'c, 'p, 'a> {
    candidates: &'c [Candidates<'p, 'a>],
    counts: SmallVec<[usize; 8]>,
    best: Option<(Decimal, SmallVec<[usize; 8]>)>,
}

impl Search<'_, '_, '_> {
    fn run(&mut self, depth: usize, remaining: usize, cost: Decimal) {
        let Some(candidates) = self.candidates.get(depth) else {
            if remaining == 0
                && self
                    .best
                    .as_ref()
                    .is_none_or(|(best_cost, _)| cost < *best_cost)
            {
                self.best = Some((cost, self.counts.clone()));
            }

            return;
        };

        let units = candidates.pool.units();
        let most = candidates.listings.len().min(remaining / units);

        for count in 0..=most {
            let Some(spent) = candidates.prefix.get(count) else {
                break;
            };

            if let Some(slot) = self.counts.get_mut(depth) {
                *slot = count;
            }

            self.run(depth + 1, remaining - count * units, cost + *spent);
        }
    }
}

impl Solver for ExhaustiveSolver {
    fn solve<'a>(pools: &Pools<'a>, target: usize) -> Result<Option<Cover<'a>>, SolverError> {
        let candidates: Vec<Candidates<'_, 'a>> = pools.iter().map(Candidates::new).collect();

        let mut search = Search {
            candidates: &candidates,
            counts: smallvec![0; candidates.len()],
            best: None,
        };

        search.run(0, target, Decimal::ZERO);

        let Some((total, counts)) = search.best else {
            return Ok(None);
        };

        let picks = candidates
            .iter()
            .zip(counts)
            .flat_map(|(candidates, count)| {
                let class = candidates.pool.class();

                candidates
                    .listings
                    .iter()
                    .take(count)
                    .map(move |&listing| Pick { listing, class })
            })
            .collect();

        Ok(Some(Cover {
            total: Money::from_decimal(total, ETH),
            picks,
        }))
    }
}
