//! Ranges for the two common LP strategies.

use crate::error::{ArgumentError, Error};
use crate::math::fee_tier::FeeTier;
use crate::pool::position::TickRange;

/// Half-width of [`tight_band`] used by the simulator when none is given.
pub const DEFAULT_BAND: f64 = 0.05;

/// Widest range a pool with this fee tier accepts.
pub fn full_range(fee_tier: FeeTier) -> TickRange {
    let (lower, upper) = fee_tier.usable_tick_bounds();
    TickRange::from_aligned(lower, upper)
}

/// `[price_point * (1 - band), price_point * (1 + band)]` aligned to the
/// fee tier's spacing, `band` in `(0, 1)`.
pub fn tight_band(price_point: f64, band: f64, fee_tier: FeeTier) -> Result<TickRange, Error> {
    if !(band > 0.0 && band < 1.0) {
        return Err(ArgumentError::InvalidBand(band).into());
    }
    TickRange::from_prices(
        price_point * (1.0 - band),
        price_point * (1.0 + band),
        fee_tier,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::math::tick_math::{MAX_TICK, MIN_TICK};

    #[test]
    fn full_range_per_tier() {
        let range = full_range(FeeTier::Lowest);
        assert_eq!((range.lower(), range.upper()), (MIN_TICK, MAX_TICK));
        let range = full_range(FeeTier::Low);
        assert_eq!((range.lower(), range.upper()), (-887270, 887270));
        let range = full_range(FeeTier::Medium);
        assert_eq!((range.lower(), range.upper()), (-887220, 887220));
        let range = full_range(FeeTier::High);
        assert_eq!((range.lower(), range.upper()), (-887200, 887200));
    }

    #[test]
    fn tight_band_around_parity() {
        let range = tight_band(1.0, DEFAULT_BAND, FeeTier::Lowest).unwrap();
        assert_eq!((range.lower(), range.upper()), (-513, 487));
        let range = tight_band(1.0, DEFAULT_BAND, FeeTier::Medium).unwrap();
        assert_eq!((range.lower(), range.upper()), (-540, 480));
    }

    #[test]
    fn tight_band_rejects_bad_inputs() {
        for band in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(matches!(
                tight_band(1.0, band, FeeTier::Low),
                Err(Error::ArgumentError(ArgumentError::InvalidBand(_)))
            ));
        }
        assert!(matches!(
            tight_band(-1.0, DEFAULT_BAND, FeeTier::Low),
            Err(Error::DomainError(DomainError::InvalidPrice(_)))
        ));
    }
}
