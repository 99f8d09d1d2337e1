//! Solvers for exact covers

use rusty_money::{Money, MoneyError, crypto::Currency};
use thiserror::Error;

use crate::{listings::Listing, pools::Pools, weights::WeightClass};

pub mod dp;
pub mod exhaustive;

/// Solver Errors
#[derive(Debug, Error)]
pub enum SolverError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// One listing chosen for a cover, with the class it was drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick<'a> {
    /// The chosen listing
    pub listing: &'a Listing<'a>,

    /// Weight class of the pool it came from
    pub class: WeightClass,
}

/// A selection of distinct listings whose units sum to the target.
#[derive(Debug, Clone)]
pub struct Cover<'a> {
    /// Sum of the picked listings' prices, as computed by the solver
    pub total: Money<'a, Currency>,

    /// Picks in the order the solver chose them
    pub picks: Vec<Pick<'a>>,
}

impl Cover<'_> {
    /// Units covered by the picks.
    pub fn units(&self) -> usize {
        self.picks.iter().map(|pick| pick.class.units).sum()
    }

    /// Number of listings picked.
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Check if nothing was picked.
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

/// Trait for finding the cheapest exact cover over a set of pools
pub trait Solver {
    /// Find the cheapest selection of distinct listings whose units sum to
    /// exactly `target`.
    ///
    /// Returns `Ok(None)` when no exact cover exists; sparse inventory makes
    /// that an ordinary outcome rather than an error. A solver may document
    /// tables on which it only finds some exact cover rather than the
    /// cheapest, as [`dp::DpSolver`] does.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve<'a>(pools: &Pools<'a>, target: usize) -> Result<Option<Cover<'a>>, SolverError>;
}
