//! 18-decimal scaling for amounts that cross into a ledger.

use crate::error::DomainError;
use crate::math::fixed_point::{f64_to_u256, u256_to_f64};
use alloy_primitives::U256;

pub const E18: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
const E18_F64: f64 = 1e18;

/// `floor(value * 10^18)`.
pub fn to_e18(value: f64) -> Result<U256, DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::InvalidAmount(value));
    }
    f64_to_u256(value * E18_F64).ok_or(DomainError::InvalidAmount(value))
}

pub fn from_e18(amount: U256) -> f64 {
    u256_to_f64(amount) / E18_F64
}
