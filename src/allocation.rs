//! Vault Allocation
//!
//! Progress of the vault toward one Black Check, from the grid sizes of the
//! originals it already holds.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::debug;

use crate::weights::WeightTable;

/// Units held by the vault, measured against the table's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    units: usize,
    target: usize,
}

impl Allocation {
    /// Sum the unit weights of held originals.
    ///
    /// A grid size the table does not know weighs nothing.
    pub fn from_holdings(holdings: impl IntoIterator<Item = u32>, table: &WeightTable) -> Self {
        let units = holdings
            .into_iter()
            .map(|checks| {
                table.units_for(checks).unwrap_or_else(|| {
                    debug!(checks, "held original has no weight class");

                    0
                })
            })
            .sum();

        Self {
            units,
            target: table.target(),
        }
    }

    /// Units held.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Units needed for a complete Black Check.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Held units as a share of one single-check original.
    pub fn single_check_equivalent(&self) -> Decimal {
        Decimal::from(self.units)
            .checked_div(Decimal::from(self.target))
            .unwrap_or(Decimal::ZERO)
    }

    /// Progress toward the target as a fraction.
    pub fn progress(&self) -> Percentage {
        Percentage::from(self.single_check_equivalent())
    }

    /// Progress toward the target in percent points, to two places.
    pub fn progress_percent(&self) -> Decimal {
        (self.progress() * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Returns true once the vault holds a full Black Check.
    pub fn is_complete(&self) -> bool {
        self.units >= self.target
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}/{}",
            self.single_check_equivalent().round_dp(4),
            self.target
        )
    }
}
