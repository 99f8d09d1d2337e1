//! Dynamic Programming Solver
//!
//! Works over unit totals `0..=target`. Entry `t` holds the cheapest known way
//! to cover exactly `t` units together with the selection that achieves it.
//! Entry `t` is built by extending entry `t - units` with one more listing from
//! a pool, where that listing is the cheapest one of the pool that the
//! extended selection does not already contain. Checking identifiers rather
//! than price ranks is what keeps a physical token from being counted twice
//! when two partial selections have consumed different prefixes of the same
//! pool.
//!
//! Only one selection is kept per unit total. The result is guaranteed to be
//! the cheapest cover when each class's units are a multiple of the units of
//! every class declared before it, as in the Checks table (1, 2, 4, 8, 16, 16,
//! 64). On other tables a cheaper cover can be missed: with units 1, 2, 3 and
//! 5 and a target of 8 the solver may return a dearer exact cover.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    crypto::{Currency, ETH},
};
use tracing::debug;

use crate::{
    pools::Pools,
    solvers::{Cover, Pick, Solver, SolverError},
};

mod selection;

use selection::{Selection, SelectionArena};

/// Cheapest known way to reach one unit total.
#[derive(Debug, Clone, Copy)]
struct Reach<'a> {
    cost: Money<'a, Currency>,
    selection: Selection,
}

/// Best transition found so far for the entry being filled.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    cost: Money<'a, Currency>,
    parent: Selection,
    pick: Pick<'a>,
}

/// Exact-cover solver using a dynamic program over unit totals.
///
/// Pools are tried in declared class order and a candidate only replaces the
/// one held when it is strictly cheaper, so equal-cost ties always resolve to
/// the earliest class and the result is reproducible.
///
/// Optimal only on unit chains such as [`WeightTable::checks`]; see the module
/// docs.
///
/// [`WeightTable::checks`]: crate::weights::WeightTable::checks
#[derive(Debug, Clone, Copy, Default)]
pub struct DpSolver;

impl Solver for DpSolver {
    fn solve<'a>(pools: &Pools<'a>, target: usize) -> Result<Option<Cover<'a>>, SolverError> {
        let mut arena = SelectionArena::new();
        let mut table: Vec<Option<Reach<'a>>> = vec![None; target + 1];

        let base = table.first_mut().ok_or(SolverError::InvariantViolation {
            message: "unit table has no zero entry",
        })?;

        *base = Some(Reach {
            cost: Money::from_decimal(Decimal::ZERO, ETH),
            selection: Selection::default(),
        });

        for units in 1..=target {
            let mut best: Option<Candidate<'a>> = None;

            for pool in pools.iter() {
                let Some(previous) = units.checked_sub(pool.units()) else {
                    continue;
                };

                let Some(reach) = table.get(previous).copied().flatten() else {
                    continue;
                };

                let used = arena.used_ids(reach.selection);

                let Some((_, listing)) = pool.first_unused(&used) else {
                    continue;
                };

                let cost = reach.cost.add(*listing.price())?;

                if best
                    .as_ref()
                    .is_none_or(|held| cost.amount() < held.cost.amount())
                {
                    best = Some(Candidate {
                        cost,
                        parent: reach.selection,
                        pick: Pick {
                            listing,
                            class: pool.class(),
                        },
                    });
                }
            }

            if let Some(candidate) = best {
                let selection = arena.extend(candidate.parent, candidate.pick);

                let entry = table.get_mut(units).ok_or(SolverError::InvariantViolation {
                    message: "unit total outside the table",
                })?;

                *entry = Some(Reach {
                    cost: candidate.cost,
                    selection,
                });
            }
        }

        let Some(reach) = table.get(target).copied().flatten() else {
            debug!(target, picks_stored = arena.len(), "no exact cover");

            return Ok(None);
        };

        let picks = arena.to_vec(reach.selection);

        if picks.len() != reach.selection.len() {
            return Err(SolverError::InvariantViolation {
                message: "selection chain length does not match its handle",
            });
        }

        debug!(
            target,
            picks = picks.len(),
            picks_stored = arena.len(),
            "found exact cover"
        );

        Ok(Some(Cover {
            total: reach.cost,
            picks,
        }))
    }
}
