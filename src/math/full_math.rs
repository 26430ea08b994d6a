use crate::error::MathError;
use alloy_primitives::{U256, U512};

#[inline(always)]
fn widen(x: U256) -> U512 {
    let [l0, l1, l2, l3] = *x.as_limbs();
    U512::from_limbs([l0, l1, l2, l3, 0, 0, 0, 0])
}

#[inline(always)]
fn narrow(x: U512) -> Result<U256, MathError> {
    let limbs = x.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::Overflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Computes `floor(a * b / denominator)` with a full 512‑bit intermediate
/// product, failing only if the quotient itself does not fit in 256 bits.
///
/// Every product of two Q96‑scaled values in the crate goes through here.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// Narrows a wide value into the `u128` liquidity domain.
pub fn u256_to_u128(x: U256) -> Result<u128, MathError> {
    let [l0, l1, l2, l3] = *x.as_limbs();
    if l2 != 0 || l3 != 0 {
        return Err(MathError::Overflow);
    }
    Ok(((l1 as u128) << 64) | l0 as u128)
}
