//! Conversions between linear `f64` prices and Q64.96 square-root prices.
//!
//! This module is the only place where floats cross into the wide integer
//! domain and back.

use crate::error::DomainError;
use crate::Q96_F64;
use alloy_primitives::U256;

const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i32 = 1075;

/// Exact `floor(x)` of a non‑negative finite float as a `U256`.
///
/// Returns `None` for negative, NaN or infinite inputs and for values of
/// 2^256 or more.
pub fn f64_to_u256(x: f64) -> Option<U256> {
    if !x.is_finite() || x < 0.0 {
        return None;
    }
    if x < 1.0 {
        return Some(U256::ZERO);
    }

    let bits = x.to_bits();
    let biased_exponent = ((bits >> F64_MANTISSA_BITS) & 0x7ff) as i32;
    let mantissa = (bits & ((1u64 << F64_MANTISSA_BITS) - 1)) | (1u64 << F64_MANTISSA_BITS);
    // x == mantissa * 2^shift
    let shift = biased_exponent - F64_EXPONENT_BIAS;

    if shift >= 0 {
        if shift as u32 + F64_MANTISSA_BITS + 1 > 256 {
            return None;
        }
        Some(U256::from(mantissa) << shift as usize)
    } else {
        Some(U256::from(mantissa >> (-shift) as u32))
    }
}

/// Converts a wide integer to the nearest representable `f64`.
pub fn u256_to_f64(x: U256) -> f64 {
    let bit_len = x.bit_len();
    if bit_len <= 64 {
        return x.as_limbs()[0] as f64;
    }
    let shift = bit_len - 64;
    let mut top = (x >> shift).as_limbs()[0];
    // sticky bit keeps the final rounding to 53 bits correct
    if !(x & ((U256::ONE << shift) - U256::ONE)).is_zero() {
        top |= 1;
    }
    top as f64 * 2f64.powi(shift as i32)
}

/// Returns `floor(sqrt(price) * 2^96)`.
///
/// `price` is the amount of token1 paid for one unit of token0. The caller
/// owns the direction convention; no inversion is detected here.
pub fn price_to_sqrt_price_x96(price: f64) -> Result<U256, DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::InvalidPrice(price));
    }
    f64_to_u256(price.sqrt() * Q96_F64).ok_or(DomainError::InvalidPrice(price))
}

/// Returns `(sqrt_price_x96 / 2^96)^2`, the linear price held in slot0.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256) -> f64 {
    let ratio = u256_to_f64(sqrt_price_x96) / Q96_F64;
    ratio * ratio
}
