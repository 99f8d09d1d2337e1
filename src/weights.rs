//! Weight Table
//!
//! A Black Check is made of 64 single checks. Every original carries a grid
//! size (80, 40, 20, 10, 5, 4 or 1 checks) and contributes a fixed number of
//! those 64 units, so the table below is the only place where grid sizes are
//! mapped onto units.

use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// Units needed for one Black Check.
pub const BLACK_CHECK_UNITS: usize = 64;

/// Errors raised while building a weight table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightTableError {
    /// The target must be a positive number of units.
    #[error("target must be at least one unit")]
    ZeroTarget,

    /// The table has no classes at all.
    #[error("weight table has no classes")]
    NoClasses,

    /// A class contributes nothing toward the target.
    #[error("class {0} contributes zero units")]
    ZeroUnits(u32),

    /// The same denomination was declared twice.
    #[error("class {0} is declared more than once")]
    DuplicateClass(u32),

    /// Editions fold into a class that is not in the table.
    #[error("edition class {0} is not declared in the table")]
    UnknownEditionClass(u32),
}

/// A single weight class: items of this denomination each contribute `units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WeightClass {
    /// Denomination (number of checks on the grid)
    pub checks: u32,

    /// Units contributed toward the target by one item
    pub units: usize,
}

impl WeightClass {
    /// Create a new weight class.
    pub const fn new(checks: u32, units: usize) -> Self {
        Self { checks, units }
    }
}

/// Weight classes, target and edition folding for one cover problem.
///
/// Class order is significant: the solver evaluates transitions in declared
/// order and keeps the first of several equally cheap candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    target: usize,
    classes: SmallVec<[WeightClass; 8]>,
    edition_class: u32,
}

impl WeightTable {
    /// Create a validated weight table.
    ///
    /// # Errors
    ///
    /// Returns a [`WeightTableError`] if the target is zero, there are no
    /// classes, a class contributes zero units, a denomination is repeated, or
    /// `edition_class` is not one of the declared classes.
    pub fn new(
        target: usize,
        classes: impl IntoIterator<Item = WeightClass>,
        edition_class: u32,
    ) -> Result<Self, WeightTableError> {
        if target == 0 {
            return Err(WeightTableError::ZeroTarget);
        }

        let mut declared: SmallVec<[WeightClass; 8]> = SmallVec::new();

        for class in classes {
            if class.units == 0 {
                return Err(WeightTableError::ZeroUnits(class.checks));
            }

            if declared.iter().any(|c| c.checks == class.checks) {
                return Err(WeightTableError::DuplicateClass(class.checks));
            }

            declared.push(class);
        }

        if declared.is_empty() {
            return Err(WeightTableError::NoClasses);
        }

        if !declared.iter().any(|c| c.checks == edition_class) {
            return Err(WeightTableError::UnknownEditionClass(edition_class));
        }

        Ok(Self {
            target,
            classes: declared,
            edition_class,
        })
    }

    /// The Checks table: 64 units, editions counted as 80-check originals.
    pub fn checks() -> Self {
        Self {
            target: BLACK_CHECK_UNITS,
            classes: [
                WeightClass::new(80, 1),
                WeightClass::new(40, 2),
                WeightClass::new(20, 4),
                WeightClass::new(10, 8),
                WeightClass::new(5, 16),
                WeightClass::new(4, 16),
                WeightClass::new(1, 64),
            ]
            .into_iter()
            .collect(),
            edition_class: 80,
        }
    }

    /// Units needed for a cover.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Classes in declared (solver) order.
    pub fn classes(&self) -> &[WeightClass] {
        &self.classes
    }

    /// Denomination that editions are folded into.
    pub fn edition_class(&self) -> u32 {
        self.edition_class
    }

    /// Position of a denomination in declared order.
    pub fn position(&self, checks: u32) -> Option<usize> {
        self.classes.iter().position(|c| c.checks == checks)
    }

    /// Units contributed by one item of the given denomination.
    pub fn units_for(&self, checks: u32) -> Option<usize> {
        self.classes
            .iter()
            .find(|c| c.checks == checks)
            .map(|c| c.units)
    }

    /// Denominations ordered for display: largest grid first.
    pub fn display_order(&self) -> SmallVec<[u32; 8]> {
        let mut order: SmallVec<[u32; 8]> = self.classes.iter().map(|c| c.checks).collect();

        order.sort_unstable_by(|a, b| b.cmp(a));

        order
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::checks()
    }
}
