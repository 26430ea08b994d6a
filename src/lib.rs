//! Uniswap V3–style concentrated-liquidity math for AMM simulation, in pure Rust.
//!
//! This crate exposes:
//! - Low‑level math primitives (`math::*`): Q64.96 sqrt prices, ticks, fee
//!   tiers, liquidity ⇄ token amounts and 18‑decimal scaling.
//! - A position model (`pool::*`) that opens, grows, shrinks and collects
//!   positions against a read‑only pool snapshot, plus swap sizing to a
//!   target price.
//! - The collateral price a lending market reads from a pool (`lending`).
//! - TOML pool configuration (`config`, feature `serde`).
//!
//! Nothing here holds state: every call returns values for an external
//! ledger to apply.
//!
//! # Examples
//!
//! ## Pure math
//! ```
//! use clmm_liquidity_math::{math::tick_math, RESOLUTION, Q96};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(sqrt_price, Q96);
//! assert_eq!(tick_math::align_to_spacing(-85177, 10).unwrap(), -85180);
//! assert_eq!(RESOLUTION, 96);
//! ```
//!
//! ## Opening and shrinking a position
//! ```
//! use clmm_liquidity_math::{
//!     math::{units::to_e18, FeeTier},
//!     pool::{PoolState, Position, TickRange},
//!     Address,
//! };
//!
//! // usdc/weth at 5000 usdc per weth, i.e. 0.0002 weth per usdc
//! let pool = PoolState::from_price(FeeTier::Low, 1.0 / 5000.0, 0).unwrap();
//! let range = TickRange::from_prices(1.0 / 4900.0, 1.0 / 5100.0, pool.fee_tier).unwrap();
//!
//! let minted = Position::open(
//!     Address::ZERO,
//!     range,
//!     &pool,
//!     to_e18(10_000.0).unwrap(),
//!     to_e18(2.0).unwrap(),
//! )
//! .unwrap();
//! assert!(minted.position.is_in_range(&pool));
//!
//! let decreased = minted.position.decrease(&pool, 0.5).unwrap();
//! let (_position, owed0, owed1) = decreased.position.collect();
//! println!("collected {owed0} usdc wei and {owed1} weth wei");
//! ```

pub use alloy_primitives::{Address, U256};

#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod lending;
pub mod math;
pub mod pool;

pub use error::Error;

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
/// `2^96` as a float, exact.
pub const Q96_F64: f64 = 79_228_162_514_264_337_593_543_950_336.0;
