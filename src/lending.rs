//! Price feed a lending market reads from a pool.
//!
//! A market lends one token of the pair against the other as collateral and
//! needs the price of the borrowed token quoted in collateral units.

use crate::error::{DomainError, Error};
use crate::math::fixed_point::sqrt_price_x96_to_price;
use crate::math::units::to_e18;
use crate::pool::Asset;
use alloy_primitives::U256;

/// Collateral units worth one unit of the borrowed token, where the borrowed
/// token is the other side of the pair from `collateral`.
pub fn collateral_price(sqrt_price_x96: U256, collateral: Asset) -> Result<f64, DomainError> {
    if sqrt_price_x96.is_zero() {
        return Err(DomainError::SqrtPriceIsZero);
    }
    let price = sqrt_price_x96_to_price(sqrt_price_x96);
    Ok(match collateral {
        Asset::Token0 => 1.0 / price,
        Asset::Token1 => price,
    })
}

/// [`collateral_price`] in the 18-decimal form a lending ledger stores.
pub fn collateral_price_e18(sqrt_price_x96: U256, collateral: Asset) -> Result<U256, Error> {
    Ok(to_e18(collateral_price(sqrt_price_x96, collateral)?)?)
}
