use crate::error::DomainError;
use crate::math::fee_tier::FeeTier;
use crate::math::fixed_point::{price_to_sqrt_price_x96, sqrt_price_x96_to_price};
use crate::math::tick_math::get_tick_at_sqrt_ratio;
use alloy_primitives::U256;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Slot0 {
    /// Current sqrt price of token0 in token1, Q64.96.
    pub sqrt_price_x96: U256,
    /// Greatest tick whose sqrt ratio does not exceed `sqrt_price_x96`.
    pub tick: i32,
}

impl Slot0 {
    pub fn from_sqrt_price(sqrt_price_x96: U256) -> Result<Self, DomainError> {
        Ok(Self {
            sqrt_price_x96,
            tick: get_tick_at_sqrt_ratio(sqrt_price_x96)?,
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Slot0 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        #[derive(serde::Deserialize)]
        struct Fields {
            sqrt_price_x96: U256,
            tick: i32,
        }

        let Fields {
            sqrt_price_x96,
            tick,
        } = Fields::deserialize(deserializer)?;
        let slot0 = Self::from_sqrt_price(sqrt_price_x96).map_err(D::Error::custom)?;
        if slot0.tick != tick {
            return Err(D::Error::custom(format!(
                "tick {tick} does not match sqrt price {sqrt_price_x96} (tick {})",
                slot0.tick
            )));
        }
        Ok(slot0)
    }
}

/// Read-only snapshot of a pool as reported by the ledger.
///
/// Nothing in this crate mutates it; position and targeting math take it by
/// reference and hand back values for the ledger to apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolState {
    pub fee_tier: FeeTier,
    pub slot0: Slot0,
    /// Active in-range liquidity.
    pub liquidity: u128,
}

impl PoolState {
    pub fn new(
        fee_tier: FeeTier,
        sqrt_price_x96: U256,
        liquidity: u128,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            fee_tier,
            slot0: Slot0::from_sqrt_price(sqrt_price_x96)?,
            liquidity,
        })
    }

    /// Snapshot of a pool initialised at a linear token1-per-token0 price.
    pub fn from_price(fee_tier: FeeTier, price: f64, liquidity: u128) -> Result<Self, DomainError> {
        Self::new(fee_tier, price_to_sqrt_price_x96(price)?, liquidity)
    }

    #[inline]
    pub fn tick_spacing(&self) -> i32 {
        self.fee_tier.tick_spacing()
    }

    #[inline]
    pub fn sqrt_price_x96(&self) -> U256 {
        self.slot0.sqrt_price_x96
    }

    #[inline]
    pub fn tick(&self) -> i32 {
        self.slot0.tick
    }

    /// Linear price of token0 in token1.
    pub fn price(&self) -> f64 {
        sqrt_price_x96_to_price(self.slot0.sqrt_price_x96)
    }

    /// `(price of token0, price of token1)`, each quoted in the other token.
    pub fn exchange_prices(&self) -> (f64, f64) {
        let price = self.price();
        (1.0 / price, price)
    }
}
