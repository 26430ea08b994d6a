use crate::error::DomainError;
use crate::math::fee_tier::FeeTier;
use crate::math::fixed_point::f64_to_u256;
use crate::Q96_F64;
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// Base of the tick lattice: the price at tick `t` is `TICK_BASE^t`.
pub const TICK_BASE: f64 = 1.0001;

const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

const SHIFT_32: usize = 32;
const SHIFT_127: usize = 127;
const SHIFT_128: usize = 128;

const ODD_TICK_RATIO: U256 = U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0]);

/// `(bit, low limb, high limb)` of the Q128 factor `1 / sqrt(1.0001)^bit`.
const RATIO_MULTIPLIERS: [(u32, u64, u64); 19] = [
    (0x2, 6459403834229662010, 18444899583751176498),
    (0x4, 17226890335427755468, 18443055278223354162),
    (0x8, 2032852871939366096, 18439367220385604838),
    (0x10, 14545316742740207172, 18431993317065449817),
    (0x20, 5129152022828963008, 18417254355718160513),
    (0x40, 4894419605888772193, 18387811781193591352),
    (0x80, 1280255884321894483, 18329067761203520168),
    (0x100, 15924666964335305636, 18212142134806087854),
    (0x200, 8010504389359918676, 17980523815641551639),
    (0x400, 10668036004952895731, 17526086738831147013),
    (0x800, 4878133418470705625, 16651378430235024244),
    (0x1000, 9537173718739605541, 15030750278693429944),
    (0x2000, 9972618978014552549, 12247334978882834399),
    (0x4000, 10428997489610666743, 8131365268884726200),
    (0x8000, 9305304367709015974, 3584323654723342297),
    (0x10000, 14301143598189091785, 696457651847595233),
    (0x20000, 7393154844743099908, 26294789957452057),
    (0x40000, 2209338891292245656, 37481735321082),
    (0x80000, 10518117631919034274, 76158723),
];

#[inline]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

fn check_tick(tick: i32) -> Result<i32, DomainError> {
    if is_valid_tick(tick) {
        Ok(tick)
    } else {
        Err(DomainError::TickOutOfBounds(tick))
    }
}

/// Returns the sqrt price (Q64.96 fixed‑point) at a given tick index,
/// or `DomainError::TickOutOfBounds` if the tick is invalid.
///
/// This is the exact integer path a deployed pool uses; every amount handed
/// to a ledger is computed from it.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, DomainError> {
    check_tick(tick)?;
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 1 != 0 {
        ODD_TICK_RATIO
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    for &(bit, low, high) in RATIO_MULTIPLIERS.iter() {
        if abs_tick & bit != 0 {
            ratio = ratio.wrapping_mul(U256::from_limbs([low, high, 0, 0])) >> SHIFT_128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let lower_32_bits = ratio.as_limbs()[0] & 0xFFFF_FFFF;
    Ok((ratio >> SHIFT_32) + U256::from((lower_32_bits != 0) as u8))
}

/// Computes the greatest tick whose sqrt ratio is `<= sqrt_price_x96`,
/// enforcing `MIN_SQRT_RATIO <= sqrt_price_x96 < MAX_SQRT_RATIO`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, DomainError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(DomainError::SqrtPriceOutOfBounds(sqrt_price_x96));
    }

    let ratio = sqrt_price_x96 << SHIFT_32;
    let msb = 255 - ratio.leading_zeros();

    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u8))) << 64usize;

    for shift in (50..=63usize).rev() {
        r = r.wrapping_mul(r) >> SHIFT_127;
        let f = r >> SHIFT_128;
        log_2 |= I256::from_raw(f << shift);
        r >>= f.as_limbs()[0] as usize;
    }

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = ((log_sqrt10001 - TICK_LOW) >> SHIFT_128).low_i32();
    let tick_high = ((log_sqrt10001 + TICK_HIGH) >> SHIFT_128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}

/// `floor(ln(price) / ln(1.0001))`.
///
/// The result is not clamped to the valid tick domain; callers building a
/// range validate it.
pub fn price_to_tick(price: f64) -> Result<i32, DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok((price.ln() / TICK_BASE.ln()).floor() as i32)
}

pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powf(tick as f64)
}

/// Float approximation of [`get_sqrt_ratio_at_tick`]: `floor(1.0001^(tick/2) * 2^96)`.
///
/// Agrees with the exact path to roughly 1e-12 relative; use it for display and
/// sizing, not for amounts.
pub fn tick_to_sqrt_price_x96(tick: i32) -> Result<U256, DomainError> {
    check_tick(tick)?;
    f64_to_u256(TICK_BASE.powf(tick as f64 / 2.0) * Q96_F64)
        .ok_or(DomainError::TickOutOfBounds(tick))
}

/// Rounds `tick` down to the nearest multiple of `spacing` (towards negative infinity).
///
/// `spacing` must belong to a fee tier, otherwise `DomainError::UnknownTickSpacing`.
pub fn align_to_spacing(tick: i32, spacing: i32) -> Result<i32, DomainError> {
    Ok(FeeTier::from_tick_spacing(spacing)?.align_tick(tick))
}

pub fn price_to_tick_with_spacing(price: f64, spacing: i32) -> Result<i32, DomainError> {
    align_to_spacing(price_to_tick(price)?, spacing)
}

/// Smallest and largest valid ticks that are multiples of `spacing`.
pub fn usable_tick_bounds(spacing: i32) -> Result<(i32, i32), DomainError> {
    Ok(FeeTier::from_tick_spacing(spacing)?.usable_tick_bounds())
}
