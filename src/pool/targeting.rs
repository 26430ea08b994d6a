//! Swap sizing: how much must enter the pool to move its price to a target.
//!
//! Within a single liquidity range the token1 leg is linear in the sqrt
//! price, `L * |target - current| / Q96`, and the token0 leg is the matching
//! `amount0_for_liquidity` over the same interval.

use crate::error::{DomainError, Error, TargetError};
use crate::math::fixed_point::price_to_sqrt_price_x96;
use crate::math::full_math::mul_div;
use crate::math::liquidity_math::amount0_for_liquidity;
use crate::pool::state::PoolState;
use crate::pool::Asset;
use crate::Q96;
use alloy_primitives::U256;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceDirection {
    /// Price of token0 rises: token1 in, token0 out.
    Up,
    /// Price of token0 falls: token0 in, token1 out.
    Down,
}

impl PriceDirection {
    /// Direction from `current` to `target`, `None` when they are equal.
    pub fn between(current: U256, target: U256) -> Option<Self> {
        match target.cmp(&current) {
            std::cmp::Ordering::Greater => Some(PriceDirection::Up),
            std::cmp::Ordering::Less => Some(PriceDirection::Down),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetSwap {
    pub direction: PriceDirection,
    pub amount0: U256,
    /// `floor(L * |target - current| / Q96)`.
    pub amount1: U256,
}

impl TargetSwap {
    fn noop(direction: PriceDirection) -> Self {
        Self {
            direction,
            amount0: U256::ZERO,
            amount1: U256::ZERO,
        }
    }

    /// Nothing to trade: already at the target, or the move is smaller than
    /// one unit of token1.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.amount1.is_zero()
    }

    pub fn token_in(&self) -> Asset {
        match self.direction {
            PriceDirection::Up => Asset::Token1,
            PriceDirection::Down => Asset::Token0,
        }
    }

    pub fn token_out(&self) -> Asset {
        self.token_in().other()
    }

    pub fn amount_in(&self) -> U256 {
        match self.direction {
            PriceDirection::Up => self.amount1,
            PriceDirection::Down => self.amount0,
        }
    }

    pub fn amount_out(&self) -> U256 {
        match self.direction {
            PriceDirection::Up => self.amount0,
            PriceDirection::Down => self.amount1,
        }
    }
}

/// Sizes the swap that moves the pool from `current_sqrt_price_x96` to
/// `target_sqrt_price_x96` assuming `liquidity` stays active throughout.
pub fn amount_to_reach_target(
    liquidity: u128,
    current_sqrt_price_x96: U256,
    target_sqrt_price_x96: U256,
) -> Result<TargetSwap, Error> {
    if current_sqrt_price_x96.is_zero() || target_sqrt_price_x96.is_zero() {
        return Err(DomainError::SqrtPriceIsZero.into());
    }
    let Some(direction) = PriceDirection::between(current_sqrt_price_x96, target_sqrt_price_x96)
    else {
        return Ok(TargetSwap::noop(PriceDirection::Up));
    };

    let distance = match direction {
        PriceDirection::Up => target_sqrt_price_x96 - current_sqrt_price_x96,
        PriceDirection::Down => current_sqrt_price_x96 - target_sqrt_price_x96,
    };
    let amount1 = mul_div(U256::from(liquidity), distance, Q96)?;
    if amount1.is_zero() {
        trace!(liquidity, ?direction, "target move truncates to zero");
        return Ok(TargetSwap::noop(direction));
    }
    let amount0 = amount0_for_liquidity(liquidity, current_sqrt_price_x96, target_sqrt_price_x96)?;

    trace!(
        liquidity,
        ?direction,
        current = %current_sqrt_price_x96,
        target = %target_sqrt_price_x96,
        %amount0,
        %amount1,
        "sized swap to target"
    );
    Ok(TargetSwap {
        direction,
        amount0,
        amount1,
    })
}

/// Like [`amount_to_reach_target`], but fails when the target lies on the
/// wrong side of the current price for the `requested` direction.
pub fn amount_to_move_price(
    liquidity: u128,
    current_sqrt_price_x96: U256,
    target_sqrt_price_x96: U256,
    requested: PriceDirection,
) -> Result<TargetSwap, Error> {
    if current_sqrt_price_x96.is_zero() || target_sqrt_price_x96.is_zero() {
        return Err(DomainError::SqrtPriceIsZero.into());
    }
    match PriceDirection::between(current_sqrt_price_x96, target_sqrt_price_x96) {
        Some(actual) if actual != requested => Err(TargetError::DirectionMismatch {
            requested,
            actual,
        }
        .into()),
        Some(_) => amount_to_reach_target(liquidity, current_sqrt_price_x96, target_sqrt_price_x96),
        None => Ok(TargetSwap::noop(requested)),
    }
}

/// Sizes the swap that moves `pool` to a linear token1-per-token0 price
/// using its active liquidity.
pub fn amount_to_reach_price(pool: &PoolState, target_price: f64) -> Result<TargetSwap, Error> {
    let target = price_to_sqrt_price_x96(target_price)?;
    amount_to_reach_target(pool.liquidity, pool.sqrt_price_x96(), target)
}
