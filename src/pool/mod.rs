pub mod position;
pub mod state;
pub mod strategy;
pub mod targeting;

pub use position::{DecreaseResult, MintResult, Position, TickRange};
pub use state::{PoolState, Slot0};
pub use targeting::{PriceDirection, TargetSwap};

/// One side of a token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Asset {
    Token0,
    Token1,
}

impl Asset {
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Asset::Token0 => Asset::Token1,
            Asset::Token1 => Asset::Token0,
        }
    }
}
