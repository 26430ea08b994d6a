use crate::pool::targeting::PriceDirection;
use alloy_primitives::U256;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

/// Inputs outside the domain of the price/tick functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Domain error - price must be positive and finite, got {0}")]
    InvalidPrice(f64),
    #[error("Domain error - amount must be non-negative and finite, got {0}")]
    InvalidAmount(f64),
    #[error("Domain error - tick {0} out of bounds")]
    TickOutOfBounds(i32),
    #[error("Domain error - sqrtPrice {0} out of bounds")]
    SqrtPriceOutOfBounds(U256),
    #[error("Domain error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("Domain error - {0} is not a recognized fee tier")]
    UnknownFeeTier(u32),
    #[error("Domain error - {0} is not a recognized tick spacing")]
    UnknownTickSpacing(i32),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("Argument error - fraction must be in (0, 1], got {0}")]
    FractionOutOfRange(f64),
    #[error("Argument error - tick range [{lower}, {upper}] is empty after alignment")]
    EmptyTickRange { lower: i32, upper: i32 },
    #[error("Argument error - tick range [{lower}, {upper}] is not aligned to spacing {spacing}")]
    MisalignedRange { lower: i32, upper: i32, spacing: i32 },
    #[error("Argument error - sqrt price range is empty")]
    EmptyPriceRange,
    #[error("Argument error - band must be in (0, 1), got {0}")]
    InvalidBand(f64),
    #[error("Argument error - amounts yield zero liquidity")]
    ZeroLiquidity,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("Target error - requested {requested:?} but target moves price {actual:?}")]
    DirectionMismatch {
        requested: PriceDirection,
        actual: PriceDirection,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] MathError),

    #[error(transparent)]
    DomainError(#[from] DomainError),

    #[error(transparent)]
    ArgumentError(#[from] ArgumentError),

    #[error(transparent)]
    TargetError(#[from] TargetError),
}
