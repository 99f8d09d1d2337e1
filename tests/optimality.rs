//! Integration tests comparing the DP solver with the exhaustive solver.
//!
//! Listings are generated from a fixed seed so every run sees the same
//! inventories, including sparse ones where no exact cover exists.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use testresult::TestResult;

use vvalue::{
    listings::{Listing, Marketplace},
    pools::Pools,
    pricing::eth,
    solvers::{Cover, Solver, dp::DpSolver, exhaustive::ExhaustiveSolver},
    weights::{WeightClass, WeightTable},
};

/// Small xorshift generator; enough to vary inventories between trials.
struct Xorshift(u64);

impl Xorshift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Random originals and editions for `table`.
///
/// With `id_space` set, original token ids are drawn from `0..id_space`, so the
/// same token is often listed under several grid sizes.
fn inventory(
    rng: &mut Xorshift,
    table: &WeightTable,
    max_per_class: u64,
    max_price: u64,
    id_space: Option<u64>,
) -> (Vec<Listing<'static>>, Vec<Listing<'static>>) {
    let mut originals = Vec::new();
    let mut editions = Vec::new();

    for class in table.classes() {
        for _ in 0..rng.below(max_per_class + 1) {
            let token_id = match id_space {
                Some(space) => rng.below(space),
                None => rng.next(),
            }
            .to_string();
            let price = eth(Decimal::from(rng.below(max_price) + 1));

            originals.push(Listing::original(
                token_id,
                price,
                Some(class.checks),
                Marketplace::OpenSea,
            ));
        }
    }

    for _ in 0..rng.below(max_per_class + 1) {
        let token_id = rng.below(max_per_class * 2).to_string();

        editions.push(Listing::edition(
            token_id,
            eth(Decimal::from(rng.below(max_price) + 1)),
        ));
    }

    (originals, editions)
}

fn assert_valid(cover: &Cover<'_>, target: usize) {
    let ids: FxHashSet<_> = cover.picks.iter().map(|pick| pick.listing.id()).collect();
    let total: Decimal = cover
        .picks
        .iter()
        .map(|pick| *pick.listing.price().amount())
        .sum();

    assert_eq!(cover.units(), target, "cover must be exact");
    assert_eq!(ids.len(), cover.len(), "no listing may be picked twice");
    assert_eq!(total, *cover.total.amount(), "total must match the picks");
}

fn compare(
    table: &WeightTable,
    trials: u64,
    max_per_class: u64,
    max_price: u64,
    id_space: Option<u64>,
) -> TestResult {
    let mut rng = Xorshift(0x9E37_79B9_7F4A_7C15);

    for _ in 0..trials {
        let (originals, editions) = inventory(&mut rng, table, max_per_class, max_price, id_space);

        let pools = Pools::build(&originals, &editions, table);

        let dp = DpSolver::solve(&pools, table.target())?;
        let exhaustive = ExhaustiveSolver::solve(&pools, table.target())?;

        match (&dp, &exhaustive) {
            (Some(dp), Some(exhaustive)) => {
                assert_valid(dp, table.target());
                assert_valid(exhaustive, table.target());

                assert_eq!(dp.total.amount(), exhaustive.total.amount());
            }
            (None, None) => {}
            _ => {
                return Err(format!(
                    "solvers disagree on reachability: dp={:?} exhaustive={:?}",
                    dp.as_ref().map(|cover| cover.total),
                    exhaustive.as_ref().map(|cover| cover.total)
                )
                .into());
            }
        }
    }

    Ok(())
}

#[test]
fn dp_matches_exhaustive_on_checks_table() -> TestResult {
    compare(&WeightTable::checks(), 150, 12, 100, None)
}

#[test]
fn dp_matches_exhaustive_on_sparse_inventory() -> TestResult {
    compare(&WeightTable::checks(), 300, 4, 20, None)
}

#[test]
fn dp_matches_exhaustive_with_tokens_relisted_across_classes() -> TestResult {
    compare(&WeightTable::checks(), 300, 12, 20, Some(24))
}

#[test]
fn dp_matches_exhaustive_on_small_table() -> TestResult {
    let table = WeightTable::new(
        8,
        [
            WeightClass::new(8, 1),
            WeightClass::new(4, 2),
            WeightClass::new(2, 4),
            WeightClass::new(1, 8),
        ],
        8,
    )?;

    compare(&table, 1000, 6, 20, None)
}

#[test]
fn dp_matches_exhaustive_on_uneven_units() -> TestResult {
    let table = WeightTable::new(
        10,
        [
            WeightClass::new(10, 1),
            WeightClass::new(3, 3),
            WeightClass::new(2, 5),
        ],
        10,
    )?;

    compare(&table, 1000, 6, 20, None)
}

#[test]
fn dp_is_deterministic() -> TestResult {
    let table = WeightTable::checks();
    let mut rng = Xorshift(42);

    for _ in 0..50 {
        let (originals, editions) = inventory(&mut rng, &table, 12, 5, None);

        let pools = Pools::build(&originals, &editions, &table);

        let first = DpSolver::solve(&pools, table.target())?;
        let second = DpSolver::solve(&pools, table.target())?;

        let ids = |cover: Option<Cover<'_>>| {
            cover.map(|cover| {
                cover
                    .picks
                    .iter()
                    .map(|pick| pick.listing.id().clone())
                    .collect::<Vec<_>>()
            })
        };

        assert_eq!(ids(first), ids(second));
    }

    Ok(())
}
