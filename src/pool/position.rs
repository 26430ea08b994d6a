use crate::error::{ArgumentError, DomainError, Error, MathError};
use crate::math::fee_tier::FeeTier;
use crate::math::fixed_point::f64_to_u256;
use crate::math::full_math::{mul_div, u256_to_u128};
use crate::math::liquidity_math::{
    add_delta, amounts_for_liquidity, liquidity_from_amounts, reserves_for_position,
};
use crate::math::tick_math::{get_sqrt_ratio_at_tick, is_valid_tick, price_to_tick, tick_to_price};
use crate::pool::state::PoolState;
use alloy_primitives::{Address, U256};
use tracing::{debug, trace};

const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);
/// `2^128` as a float, exact.
const Q128_F64: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

/// An aligned, non-empty `[lower, upper)` tick interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickRange {
    lower: i32,
    upper: i32,
}

impl TickRange {
    /// Aligns both ticks down to the fee tier's spacing and orders them.
    ///
    /// Fails if either tick, before or after alignment, leaves the valid
    /// domain, or if both collapse onto the same tick.
    pub fn new(tick_a: i32, tick_b: i32, fee_tier: FeeTier) -> Result<Self, Error> {
        let mut aligned = [tick_a, tick_b];
        for tick in aligned.iter_mut() {
            if !is_valid_tick(*tick) {
                return Err(DomainError::TickOutOfBounds(*tick).into());
            }
            *tick = fee_tier.align_tick(*tick);
        }
        aligned.sort_unstable();
        let [lower, upper] = aligned;
        Self::from_bounds(lower, upper)
    }

    /// Range from two linear prices in either order.
    ///
    /// Each price becomes an aligned tick first and the ticks are sorted
    /// afterwards; the prices themselves are never reordered.
    pub fn from_prices(price_a: f64, price_b: f64, fee_tier: FeeTier) -> Result<Self, Error> {
        let tick_a = price_to_tick(price_a)?;
        let tick_b = price_to_tick(price_b)?;
        let range = Self::new(tick_a, tick_b, fee_tier)?;
        trace!(
            price_a,
            price_b,
            lower = range.lower,
            upper = range.upper,
            "price range mapped to ticks"
        );
        Ok(range)
    }

    /// Already ordered bounds, both within the tick domain and `lower < upper`.
    fn from_bounds(lower: i32, upper: i32) -> Result<Self, Error> {
        for tick in [lower, upper] {
            if !is_valid_tick(tick) {
                return Err(DomainError::TickOutOfBounds(tick).into());
            }
        }
        if lower >= upper {
            return Err(ArgumentError::EmptyTickRange { lower, upper }.into());
        }
        Ok(Self { lower, upper })
    }

    /// Caller guarantees `lower < upper`, both valid and aligned.
    pub(crate) const fn from_aligned(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn lower(&self) -> i32 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> i32 {
        self.upper
    }

    #[inline]
    pub fn contains(&self, tick: i32) -> bool {
        self.lower <= tick && tick < self.upper
    }

    #[inline]
    pub fn is_aligned_to(&self, fee_tier: FeeTier) -> bool {
        fee_tier.align_tick(self.lower) == self.lower
            && fee_tier.align_tick(self.upper) == self.upper
    }

    /// Exact Q64.96 sqrt ratios at both ends.
    pub fn sqrt_ratios(&self) -> Result<(U256, U256), DomainError> {
        Ok((
            get_sqrt_ratio_at_tick(self.lower)?,
            get_sqrt_ratio_at_tick(self.upper)?,
        ))
    }

    /// Linear prices at both ends.
    pub fn prices(&self) -> (f64, f64) {
        (tick_to_price(self.lower), tick_to_price(self.upper))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TickRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Bounds {
            lower: i32,
            upper: i32,
        }

        let Bounds { lower, upper } = Bounds::deserialize(deserializer)?;
        Self::from_bounds(lower, upper).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub owner: Address,
    pub range: TickRange,
    pub liquidity: u128,
    /// Realized by [`Position::decrease`] and not yet collected.
    pub tokens_owed0: U256,
    pub tokens_owed1: U256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintResult {
    pub position: Position,
    pub liquidity_delta: u128,
    /// Token0 consumed, never more than desired.
    pub amount0: U256,
    /// Token1 consumed, never more than desired.
    pub amount1: U256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecreaseResult {
    pub position: Position,
    pub liquidity_delta: u128,
    /// Token0 released at the pool's price at the time of the decrease.
    pub amount0: U256,
    pub amount1: U256,
}

fn signed(liquidity: u128) -> Result<i128, MathError> {
    i128::try_from(liquidity).map_err(|_| MathError::Overflow)
}

/// Liquidity the desired amounts can fund in `range` and the amounts that
/// liquidity actually consumes.
fn mint_amounts(
    range: &TickRange,
    pool: &PoolState,
    amount0_desired: U256,
    amount1_desired: U256,
) -> Result<(u128, U256, U256), Error> {
    if !range.is_aligned_to(pool.fee_tier) {
        return Err(ArgumentError::MisalignedRange {
            lower: range.lower,
            upper: range.upper,
            spacing: pool.tick_spacing(),
        }
        .into());
    }

    let (sqrt_lower, sqrt_upper) = range.sqrt_ratios()?;
    let liquidity = liquidity_from_amounts(
        pool.sqrt_price_x96(),
        sqrt_lower,
        sqrt_upper,
        amount0_desired,
        amount1_desired,
    )?;
    if liquidity == 0 {
        return Err(ArgumentError::ZeroLiquidity.into());
    }

    let (amount0, amount1) =
        amounts_for_liquidity(pool.sqrt_price_x96(), sqrt_lower, sqrt_upper, liquidity)?;
    Ok((liquidity, amount0, amount1))
}

impl Position {
    pub fn open(
        owner: Address,
        range: TickRange,
        pool: &PoolState,
        amount0_desired: U256,
        amount1_desired: U256,
    ) -> Result<MintResult, Error> {
        let (liquidity, amount0, amount1) =
            mint_amounts(&range, pool, amount0_desired, amount1_desired)?;

        debug!(
            %owner,
            lower = range.lower,
            upper = range.upper,
            liquidity,
            %amount0,
            %amount1,
            "opened position"
        );

        Ok(MintResult {
            position: Position {
                owner,
                range,
                liquidity,
                tokens_owed0: U256::ZERO,
                tokens_owed1: U256::ZERO,
            },
            liquidity_delta: liquidity,
            amount0,
            amount1,
        })
    }

    /// Adds liquidity funded by the extra amounts at the pool's current price.
    pub fn increase(
        &self,
        pool: &PoolState,
        amount0_desired: U256,
        amount1_desired: U256,
    ) -> Result<MintResult, Error> {
        let (delta, amount0, amount1) =
            mint_amounts(&self.range, pool, amount0_desired, amount1_desired)?;
        let liquidity = add_delta(self.liquidity, signed(delta)?)?;

        debug!(
            owner = %self.owner,
            liquidity_before = self.liquidity,
            liquidity,
            %amount0,
            %amount1,
            "increased position"
        );

        Ok(MintResult {
            position: Position {
                liquidity,
                ..self.clone()
            },
            liquidity_delta: delta,
            amount0,
            amount1,
        })
    }

    /// Removes `fraction` of the liquidity, `fraction` in `(0, 1]`.
    ///
    /// The remaining liquidity is `floor(L * (1 - fraction))`, with the
    /// fraction taken exactly into Q128 fixed point. The released amounts are
    /// valued at the pool's current price and added to the owed balances.
    pub fn decrease(&self, pool: &PoolState, fraction: f64) -> Result<DecreaseResult, Error> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ArgumentError::FractionOutOfRange(fraction).into());
        }

        let fraction_x128 = f64_to_u256(fraction * Q128_F64)
            .ok_or(ArgumentError::FractionOutOfRange(fraction))?;
        let remaining = u256_to_u128(mul_div(
            U256::from(self.liquidity),
            Q128 - fraction_x128,
            Q128,
        )?)?;
        let delta = self.liquidity - remaining;
        let liquidity = add_delta(self.liquidity, -signed(delta)?)?;

        let (sqrt_lower, sqrt_upper) = self.range.sqrt_ratios()?;
        let (amount0, amount1) =
            amounts_for_liquidity(pool.sqrt_price_x96(), sqrt_lower, sqrt_upper, delta)?;

        let tokens_owed0 = self
            .tokens_owed0
            .checked_add(amount0)
            .ok_or(MathError::Overflow)?;
        let tokens_owed1 = self
            .tokens_owed1
            .checked_add(amount1)
            .ok_or(MathError::Overflow)?;

        debug!(
            owner = %self.owner,
            fraction,
            liquidity_before = self.liquidity,
            liquidity,
            tick = pool.tick(),
            %amount0,
            %amount1,
            "decreased position"
        );

        Ok(DecreaseResult {
            position: Position {
                liquidity,
                tokens_owed0,
                tokens_owed1,
                ..self.clone()
            },
            liquidity_delta: delta,
            amount0,
            amount1,
        })
    }

    /// Returns the owed balances and the position with nothing left owed.
    pub fn collect(&self) -> (Position, U256, U256) {
        debug!(
            owner = %self.owner,
            amount0 = %self.tokens_owed0,
            amount1 = %self.tokens_owed1,
            "collected position"
        );
        (
            Position {
                tokens_owed0: U256::ZERO,
                tokens_owed1: U256::ZERO,
                ..self.clone()
            },
            self.tokens_owed0,
            self.tokens_owed1,
        )
    }

    /// Token amounts the liquidity represents at the pool's current price.
    pub fn amounts(&self, pool: &PoolState) -> Result<(U256, U256), Error> {
        let (sqrt_lower, sqrt_upper) = self.range.sqrt_ratios()?;
        amounts_for_liquidity(pool.sqrt_price_x96(), sqrt_lower, sqrt_upper, self.liquidity)
    }

    /// Float view of [`Position::amounts`] from the linear prices.
    pub fn reserves(&self, pool: &PoolState) -> Result<(f64, f64), Error> {
        let (lower_price, upper_price) = self.range.prices();
        Ok(reserves_for_position(
            self.liquidity,
            lower_price,
            upper_price,
            pool.price(),
        )?)
    }

    #[inline]
    pub fn is_in_range(&self, pool: &PoolState) -> bool {
        self.range.contains(pool.tick())
    }
}
