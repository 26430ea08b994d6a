use crate::error::{ArgumentError, DomainError, Error, MathError};
use crate::math::full_math::{mul_div, u256_to_u128};
use crate::{Q96, RESOLUTION};
use alloy_primitives::U256;

/// Applies a signed liquidity delta, failing instead of wrapping.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

/// Orders a pair of sqrt prices and rejects the degenerate cases every
/// range formula divides by.
fn sorted_range(sqrt_a: U256, sqrt_b: U256) -> Result<(U256, U256), Error> {
    let (lower, upper) = if sqrt_a <= sqrt_b {
        (sqrt_a, sqrt_b)
    } else {
        (sqrt_b, sqrt_a)
    };
    if lower.is_zero() {
        return Err(DomainError::SqrtPriceIsZero.into());
    }
    if lower == upper {
        return Err(ArgumentError::EmptyPriceRange.into());
    }
    Ok((lower, upper))
}

/// Liquidity supplied by `amount0` of token0 across `[sqrt_a, sqrt_b]`:
/// `amount0 * (sqrt_a * sqrt_b / Q96) / (sqrt_b - sqrt_a)`.
pub fn liquidity_from_amount0(amount0: U256, sqrt_a: U256, sqrt_b: U256) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    let intermediate = mul_div(lower, upper, Q96)?;
    Ok(u256_to_u128(mul_div(amount0, intermediate, upper - lower)?)?)
}

/// Liquidity supplied by `amount1` of token1 across `[sqrt_a, sqrt_b]`:
/// `amount1 * Q96 / (sqrt_b - sqrt_a)`.
pub fn liquidity_from_amount1(amount1: U256, sqrt_a: U256, sqrt_b: U256) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    Ok(u256_to_u128(mul_div(amount1, Q96, upper - lower)?)?)
}

/// Largest liquidity that both desired amounts can fund at the current price.
///
/// Below the range only token0 is used, above it only token1. Inside the
/// range both candidates are computed and the smaller one wins, so neither
/// token is over-drawn; the surplus of the other token stays with the caller.
pub fn liquidity_from_amounts(
    sqrt_current: U256,
    sqrt_a: U256,
    sqrt_b: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;

    if sqrt_current <= lower {
        liquidity_from_amount0(amount0, lower, upper)
    } else if sqrt_current < upper {
        let liquidity0 = liquidity_from_amount0(amount0, sqrt_current, upper)?;
        let liquidity1 = liquidity_from_amount1(amount1, lower, sqrt_current)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_from_amount1(amount1, lower, upper)
    }
}

/// Token0 held by `liquidity` across `[sqrt_a, sqrt_b]`, rounded down:
/// `floor(floor((L << 96) * (sqrt_b - sqrt_a) / sqrt_b) / sqrt_a)`.
pub fn amount0_for_liquidity(liquidity: u128, sqrt_a: U256, sqrt_b: U256) -> Result<U256, Error> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    let numerator = U256::from(liquidity) << RESOLUTION as usize;
    Ok(mul_div(numerator, upper - lower, upper)? / lower)
}

/// Token1 held by `liquidity` across `[sqrt_a, sqrt_b]`, rounded down:
/// `floor(L * (sqrt_b - sqrt_a) / Q96)`.
pub fn amount1_for_liquidity(liquidity: u128, sqrt_a: U256, sqrt_b: U256) -> Result<U256, Error> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    Ok(mul_div(U256::from(liquidity), upper - lower, Q96)?)
}

/// Token amounts represented by `liquidity` at `sqrt_current`, using the
/// same three regimes as [`liquidity_from_amounts`].
pub fn amounts_for_liquidity(
    sqrt_current: U256,
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: u128,
) -> Result<(U256, U256), Error> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;

    if sqrt_current <= lower {
        Ok((amount0_for_liquidity(liquidity, lower, upper)?, U256::ZERO))
    } else if sqrt_current < upper {
        Ok((
            amount0_for_liquidity(liquidity, sqrt_current, upper)?,
            amount1_for_liquidity(liquidity, lower, sqrt_current)?,
        ))
    } else {
        Ok((U256::ZERO, amount1_for_liquidity(liquidity, lower, upper)?))
    }
}

/// Float reserves of a position with linear prices:
///
/// * below the range: `(L * (1/sqrt(lower) - 1/sqrt(upper)), 0)`
/// * above the range: `(0, L * (sqrt(upper) - sqrt(lower)))`
/// * otherwise: `(L * (1/sqrt(current) - 1/sqrt(upper)), L * (sqrt(current) - sqrt(lower)))`
///
/// Both boundaries belong to the in-range branch, which agrees with the
/// outer formulas there. An inverted `lower_price`/`upper_price` pair is sorted.
pub fn reserves_for_position(
    liquidity: u128,
    lower_price: f64,
    upper_price: f64,
    current_price: f64,
) -> Result<(f64, f64), DomainError> {
    for price in [lower_price, upper_price, current_price] {
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::InvalidPrice(price));
        }
    }
    let (lower_price, upper_price) = if lower_price <= upper_price {
        (lower_price, upper_price)
    } else {
        (upper_price, lower_price)
    };

    let liquidity = liquidity as f64;
    let sqrt_lower = lower_price.sqrt();
    let sqrt_upper = upper_price.sqrt();
    let sqrt_current = current_price.sqrt();

    Ok(if current_price < lower_price {
        (liquidity * (1.0 / sqrt_lower - 1.0 / sqrt_upper), 0.0)
    } else if current_price > upper_price {
        (0.0, liquidity * (sqrt_upper - sqrt_lower))
    } else {
        (
            liquidity * (1.0 / sqrt_current - 1.0 / sqrt_upper),
            liquidity * (sqrt_current - sqrt_lower),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::get_sqrt_ratio_at_tick;
    use approx::assert_relative_eq;

    const SQRT_CURRENT: U256 = U256::from_limbs([18437907985951883264, 60740009, 0, 0]);

    fn usdc_weth_range() -> (U256, U256) {
        (
            get_sqrt_ratio_at_tick(-85380).unwrap(),
            get_sqrt_ratio_at_tick(-84980).unwrap(),
        )
    }

    fn e18(units: u64) -> U256 {
        U256::from(units) * U256::from(1_000_000_000_000_000_000u64)
    }

    // ------------------------- add_delta tests -------------------------

    #[test]
    fn add_delta_adds_positive_delta() {
        assert_eq!(add_delta(100, 20).unwrap(), 120);
    }

    #[test]
    fn add_delta_subtracts_negative_delta() {
        assert_eq!(add_delta(100, -20).unwrap(), 80);
    }

    #[test]
    fn add_delta_zero_delta_returns_same() {
        assert_eq!(add_delta(123456789, 0).unwrap(), 123456789);
    }

    #[test]
    fn add_delta_positive_overflow() {
        assert!(matches!(add_delta(u128::MAX, 1), Err(MathError::Overflow)));
    }

    #[test]
    fn add_delta_negative_no_underflow_at_boundary() {
        assert_eq!(add_delta(1_000, -1_000).unwrap(), 0);
    }

    #[test]
    fn add_delta_negative_underflow() {
        assert!(matches!(add_delta(100, -200), Err(MathError::Underflow)));
        assert!(matches!(add_delta(0, i128::MIN), Err(MathError::Underflow)));
    }

    // ------------------------- liquidity from amounts -------------------------

    #[test]
    fn current_sqrt_fixture_is_the_configured_pool_price() {
        assert_eq!(SQRT_CURRENT, U256::from(1120455419495722814493687808u128));
    }

    #[test]
    fn single_sided_liquidity_candidates() {
        let (sqrt_lower, sqrt_upper) = usdc_weth_range();
        assert_eq!(
            liquidity_from_amount0(e18(10_000), SQRT_CURRENT, sqrt_upper).unwrap(),
            14488289977754616288769
        );
        assert_eq!(
            liquidity_from_amount1(e18(2), sqrt_lower, SQRT_CURRENT).unwrap(),
            13949318807175567298654
        );
    }

    #[test]
    fn candidates_ignore_argument_order() {
        let (sqrt_lower, sqrt_upper) = usdc_weth_range();
        assert_eq!(
            liquidity_from_amount0(e18(5), sqrt_lower, sqrt_upper).unwrap(),
            liquidity_from_amount0(e18(5), sqrt_upper, sqrt_lower).unwrap()
        );
        assert_eq!(
            amount1_for_liquidity(1 << 80, sqrt_upper, sqrt_lower).unwrap(),
            amount1_for_liquidity(1 << 80, sqrt_lower, sqrt_upper).unwrap()
        );
    }

    #[test]
    fn in_range_mint_takes_the_smaller_candidate() {
        let (sqrt_lower, sqrt_upper) = usdc_weth_range();
        let liquidity =
            liquidity_from_amounts(SQRT_CURRENT, sqrt_lower, sqrt_upper, e18(10_000), e18(2))
                .unwrap();
        assert_eq!(liquidity, 13949318807175567298654);

        let (amount0, amount1) =
            amounts_for_liquidity(SQRT_CURRENT, sqrt_lower, sqrt_upper, liquidity).unwrap();
        assert_eq!(amount0, U256::from(9627995318007447614973u128));
        assert_eq!(amount1, U256::from(1999999999999999999u64));
        assert!(amount0 <= e18(10_000));
        assert!(amount1 <= e18(2));
    }

    #[test]
    fn out_of_range_mint_uses_one_token() {
        let (sqrt_lower, sqrt_upper) = usdc_weth_range();

        // below the range token1 is irrelevant
        let below = get_sqrt_ratio_at_tick(-90000).unwrap();
        let l_below =
            liquidity_from_amounts(below, sqrt_lower, sqrt_upper, e18(100), U256::ZERO).unwrap();
        assert_eq!(
            l_below,
            liquidity_from_amount0(e18(100), sqrt_lower, sqrt_upper).unwrap()
        );
        let (amount0, amount1) =
            amounts_for_liquidity(below, sqrt_lower, sqrt_upper, l_below).unwrap();
        assert!(amount0 <= e18(100));
        assert_eq!(amount1, U256::ZERO);

        // above the range token0 is irrelevant
        let above = get_sqrt_ratio_at_tick(-80000).unwrap();
        let l_above =
            liquidity_from_amounts(above, sqrt_lower, sqrt_upper, U256::ZERO, e18(1)).unwrap();
        assert_eq!(
            l_above,
            liquidity_from_amount1(e18(1), sqrt_lower, sqrt_upper).unwrap()
        );
        let (amount0, amount1) =
            amounts_for_liquidity(above, sqrt_lower, sqrt_upper, l_above).unwrap();
        assert_eq!(amount0, U256::ZERO);
        assert!(amount1 <= e18(1));
    }

    #[test]
    fn lower_boundary_counts_as_below_range() {
        let (sqrt_lower, sqrt_upper) = usdc_weth_range();
        let (amount0, amount1) =
            amounts_for_liquidity(sqrt_lower, sqrt_lower, sqrt_upper, 10u128.pow(24)).unwrap();
        assert!(amount0 > U256::ZERO);
        assert_eq!(amount1, U256::ZERO);

        let (amount0, amount1) =
            amounts_for_liquidity(sqrt_upper, sqrt_lower, sqrt_upper, 10u128.pow(24)).unwrap();
        assert_eq!(amount0, U256::ZERO);
        assert!(amount1 > U256::ZERO);
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        let (sqrt_lower, _) = usdc_weth_range();
        assert!(matches!(
            liquidity_from_amount0(e18(1), sqrt_lower, sqrt_lower),
            Err(Error::ArgumentError(ArgumentError::EmptyPriceRange))
        ));
        assert!(matches!(
            amount0_for_liquidity(1, U256::ZERO, sqrt_lower),
            Err(Error::DomainError(DomainError::SqrtPriceIsZero))
        ));
    }

    #[test]
    fn liquidity_that_does_not_fit_u128_is_an_overflow() {
        let sqrt_lower = get_sqrt_ratio_at_tick(0).unwrap();
        let sqrt_upper = get_sqrt_ratio_at_tick(1).unwrap();
        assert!(matches!(
            liquidity_from_amount1(U256::from(u128::MAX), sqrt_lower, sqrt_upper),
            Err(Error::MathError(MathError::Overflow))
        ));
    }

    #[test]
    fn extreme_sqrt_prices_do_not_truncate() {
        // product of the two sqrt prices is ~2^321
        let sqrt_lower = get_sqrt_ratio_at_tick(887000).unwrap();
        let sqrt_upper = get_sqrt_ratio_at_tick(887272).unwrap();
        let liquidity = 1_000_000_000_000_000_000u128;
        let amount1 = amount1_for_liquidity(liquidity, sqrt_lower, sqrt_upper).unwrap();
        assert!(amount1 > U256::ZERO);
        let back = liquidity_from_amount1(amount1, sqrt_lower, sqrt_upper).unwrap();
        assert!(back <= liquidity);
        assert!(liquidity - back < 1_000);
    }

    // ------------------------- float reserves -------------------------

    #[test]
    fn reserves_three_regimes() {
        let liquidity = 1_000_000u128;
        let l = liquidity as f64;

        let (amount0, amount1) = reserves_for_position(liquidity, 4900.0, 5100.0, 5200.0).unwrap();
        assert_eq!(amount0, 0.0);
        assert_relative_eq!(amount1, l * (5100f64.sqrt() - 4900f64.sqrt()));

        let (amount0, amount1) = reserves_for_position(liquidity, 4900.0, 5100.0, 4800.0).unwrap();
        assert_relative_eq!(amount0, l * (1.0 / 4900f64.sqrt() - 1.0 / 5100f64.sqrt()));
        assert_eq!(amount1, 0.0);

        let (amount0, amount1) = reserves_for_position(liquidity, 4900.0, 5100.0, 5000.0).unwrap();
        assert!(amount0 > 0.0);
        assert!(amount1 > 0.0);
    }

    #[test]
    fn reserves_are_continuous_at_both_boundaries() {
        let liquidity = 13949318807175567298654u128;
        let (lower, upper) = (1.0 / 5100.0, 1.0 / 4900.0);
        let l = liquidity as f64;

        let (in0, in1) = reserves_for_position(liquidity, lower, upper, lower).unwrap();
        assert_relative_eq!(
            in0,
            l * (1.0 / lower.sqrt() - 1.0 / upper.sqrt()),
            max_relative = 1e-12
        );
        assert_relative_eq!(in1, 0.0, epsilon = 1e-6 * l);

        let (in0, in1) = reserves_for_position(liquidity, lower, upper, upper).unwrap();
        assert_relative_eq!(in0, 0.0, epsilon = 1e-6 * l);
        assert_relative_eq!(in1, l * (upper.sqrt() - lower.sqrt()), max_relative = 1e-12);
    }

    #[test]
    fn reserves_sort_inverted_prices_and_reject_bad_ones() {
        assert_eq!(
            reserves_for_position(7, 5100.0, 4900.0, 4800.0).unwrap(),
            reserves_for_position(7, 4900.0, 5100.0, 4800.0).unwrap()
        );
        assert!(matches!(
            reserves_for_position(7, 0.0, 4900.0, 4800.0),
            Err(DomainError::InvalidPrice(_))
        ));
    }
}
