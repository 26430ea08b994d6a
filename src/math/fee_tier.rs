use crate::error::DomainError;
use crate::math::tick_math::MAX_TICK;

/// Pool fee in hundredths of a basis point (pips), each tied to one tick spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
#[repr(u32)]
pub enum FeeTier {
    /// 0.01%
    Lowest = 100,
    /// 0.05%
    Low = 500,
    /// 0.3%
    Medium = 3000,
    /// 1%
    High = 10_000,
}

impl FeeTier {
    pub const ALL: [FeeTier; 4] = [FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High];

    #[inline]
    pub const fn pips(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeTier::Lowest => 1,
            FeeTier::Low => 10,
            FeeTier::Medium => 60,
            FeeTier::High => 200,
        }
    }

    /// Fee as a fraction of the input amount, e.g. `0.003` for [`FeeTier::Medium`].
    #[inline]
    pub fn fee_rate(self) -> f64 {
        self.pips() as f64 / 1_000_000.0
    }

    /// Rounds `tick` down to a multiple of this tier's spacing.
    #[inline]
    pub const fn align_tick(self, tick: i32) -> i32 {
        tick.div_euclid(self.tick_spacing()) * self.tick_spacing()
    }

    /// Smallest and largest valid ticks aligned to this tier's spacing.
    #[inline]
    pub const fn usable_tick_bounds(self) -> (i32, i32) {
        let upper = (MAX_TICK / self.tick_spacing()) * self.tick_spacing();
        (-upper, upper)
    }

    pub fn from_pips(pips: u32) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.pips() == pips)
            .ok_or(DomainError::UnknownFeeTier(pips))
    }

    pub fn from_tick_spacing(spacing: i32) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.tick_spacing() == spacing)
            .ok_or(DomainError::UnknownTickSpacing(spacing))
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = DomainError;

    fn try_from(pips: u32) -> Result<Self, Self::Error> {
        Self::from_pips(pips)
    }
}

impl From<FeeTier> for u32 {
    fn from(tier: FeeTier) -> Self {
        tier.pips()
    }
}

pub fn spacing_for_fee(pips: u32) -> Result<i32, DomainError> {
    FeeTier::from_pips(pips).map(FeeTier::tick_spacing)
}

pub fn fee_for_spacing(spacing: i32) -> Result<u32, DomainError> {
    FeeTier::from_tick_spacing(spacing).map(FeeTier::pips)
}
