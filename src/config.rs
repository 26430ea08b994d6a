//! TOML configuration for the pools a simulation starts from.
//!
//! ```toml
//! [pools.usdc_weth_500]
//! fee = 500
//! prices = [5000.0, 1.0]
//!
//! [pools.usdc_dai_100]
//! fee = 100
//! prices = [1.0, 1.0]
//! liquidity = 1000000
//! ```
//!
//! `prices` are amounts of token0 and token1 of equal value, so the pool
//! starts at `prices[1] / prices[0]` token1 per token0.

use crate::error::{DomainError, Error};
use crate::math::fee_tier::FeeTier;
use crate::math::fixed_point::price_to_sqrt_price_x96;
use crate::pool::state::PoolState;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error - failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config error - failed to parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config error - no pools configured")]
    NoPools,
    #[error("Config error - pool '{name}': {source}")]
    InvalidPool { name: String, source: Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Pools keyed by name.
    pub pools: BTreeMap<String, PoolConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Fee in pips; must be one of the supported tiers.
    pub fee: FeeTier,
    /// Equal-value amounts of token0 and token1.
    pub prices: [f64; 2],
    /// Active liquidity the snapshot reports. TOML integers stop at `i64`.
    #[serde(default)]
    pub liquidity: u64,
}

impl SimulatorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), pools = config.pools.len(), "loaded simulator config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pools.is_empty() {
            return Err(ConfigError::NoPools);
        }
        for (name, pool) in &self.pools {
            pool.validate().map_err(|source| ConfigError::InvalidPool {
                name: name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Snapshots of every configured pool, keyed by name.
    pub fn pool_states(&self) -> Result<BTreeMap<String, PoolState>, ConfigError> {
        self.pools
            .iter()
            .map(|(name, pool)| {
                pool.pool_state()
                    .map(|state| (name.clone(), state))
                    .map_err(|source| ConfigError::InvalidPool {
                        name: name.clone(),
                        source,
                    })
            })
            .collect()
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), Error> {
        for price in self.prices {
            if !price.is_finite() || price <= 0.0 {
                return Err(DomainError::InvalidPrice(price).into());
            }
        }
        self.pool_state().map(|_| ())
    }

    pub fn initial_sqrt_price_x96(&self) -> Result<U256, DomainError> {
        price_to_sqrt_price_x96(self.prices[1] / self.prices[0])
    }

    pub fn pool_state(&self) -> Result<PoolState, Error> {
        Ok(PoolState::new(
            self.fee,
            self.initial_sqrt_price_x96()?,
            u128::from(self.liquidity),
        )?)
    }
}
