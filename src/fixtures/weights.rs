//! Weight Table Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    weights::{WeightClass, WeightTable},
};

/// Weight table configuration in YAML
#[derive(Debug, Deserialize)]
pub struct WeightsFixture {
    /// Units needed for a cover
    pub target: usize,

    /// Classes in solver order
    pub classes: Vec<WeightClass>,

    /// Denomination editions fold into
    pub edition_class: u32,
}

impl TryFrom<WeightsFixture> for WeightTable {
    type Error = FixtureError;

    fn try_from(fixture: WeightsFixture) -> Result<Self, Self::Error> {
        Ok(WeightTable::new(
            fixture.target,
            fixture.classes,
            fixture.edition_class,
        )?)
    }
}
