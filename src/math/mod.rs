pub mod fee_tier;
pub mod fixed_point;
pub mod full_math;
pub mod liquidity_math;
pub mod tick_math;
pub mod units;

pub use fee_tier::FeeTier;
