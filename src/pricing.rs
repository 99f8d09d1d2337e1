//! Prices

use rust_decimal::Decimal;
use rusty_money::{
    Money, MoneyError,
    crypto::{Currency, ETH},
};
use thiserror::Error;

use crate::listings::Listing;

/// Errors that can occur while reading a price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount could not be parsed or is negative.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Only ETH prices are understood.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No listings were provided, so currency could not be determined.
    #[error("no listings provided; cannot determine currency")]
    NoListings,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// An amount of ETH.
pub fn eth(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount, ETH)
}

/// Parse a price string such as `"0.42 ETH"` or a bare `"0.42"` (ETH implied).
///
/// # Errors
///
/// Returns [`PriceError::InvalidPrice`] if the amount is not a non-negative
/// decimal, or [`PriceError::UnknownCurrency`] for any currency but ETH.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, PriceError> {
    let mut parts = s.split_whitespace();

    let amount = parts
        .next()
        .ok_or_else(|| PriceError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(s.to_string()))?;

    match parts.next() {
        None | Some("ETH") => {}
        Some(other) => return Err(PriceError::UnknownCurrency(other.to_string())),
    }

    if parts.next().is_some() || amount.is_sign_negative() {
        return Err(PriceError::InvalidPrice(s.to_string()));
    }

    Ok(eth(amount))
}

/// Calculates the total price of a list of listings
///
/// # Errors
///
/// - [`TotalPriceError::NoListings`]: No listings were provided, so currency could not be determined.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'l, 'a: 'l>(
    listings: impl IntoIterator<Item = &'l Listing<'a>>,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let mut listings = listings.into_iter();

    let first = listings.next().ok_or(TotalPriceError::NoListings)?;

    let total = listings.try_fold(*first.price(), |acc, listing| acc.add(*listing.price()))?;

    Ok(total)
}
