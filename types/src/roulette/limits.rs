use super::BetKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when table limits are missing or inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitsError {
    #[error("{field} must be > 0")]
    NonPositive { field: &'static str },
    #[error("min ({min}) must not exceed min_outside ({min_outside})")]
    MinAboveOutside { min: u64, min_outside: u64 },
    #[error("min_outside ({min_outside}) must not exceed max ({max})")]
    OutsideAboveMax { min_outside: u64, max: u64 },
}

/// Table limits, `0 < min <= min_outside <= max`.
///
/// Can only be obtained through [BetLimits::new] (or deserialization, which
/// goes through it), so every value in circulation satisfies the invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimits", into = "RawLimits")]
pub struct BetLimits {
    min: u64,
    min_outside: u64,
    max: u64,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawLimits {
    min: u64,
    min_outside: u64,
    max: u64,
}

impl BetLimits {
    pub fn new(min: u64, min_outside: u64, max: u64) -> Result<Self, LimitsError> {
        if min == 0 {
            return Err(LimitsError::NonPositive { field: "min" });
        }
        if min_outside == 0 {
            return Err(LimitsError::NonPositive { field: "min_outside" });
        }
        if max == 0 {
            return Err(LimitsError::NonPositive { field: "max" });
        }
        if min > min_outside {
            return Err(LimitsError::MinAboveOutside { min, min_outside });
        }
        if min_outside > max {
            return Err(LimitsError::OutsideAboveMax { min_outside, max });
        }
        Ok(Self {
            min,
            min_outside,
            max,
        })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn min_outside(&self) -> u64 {
        self.min_outside
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Lowest legal stake for a bet kind.
    pub fn lower_bound(&self, kind: BetKind) -> u64 {
        if kind.is_outside() {
            self.min_outside
        } else {
            self.min
        }
    }
}

impl TryFrom<RawLimits> for BetLimits {
    type Error = LimitsError;

    fn try_from(raw: RawLimits) -> Result<Self, Self::Error> {
        BetLimits::new(raw.min, raw.min_outside, raw.max)
    }
}

impl From<BetLimits> for RawLimits {
    fn from(limits: BetLimits) -> Self {
        Self {
            min: limits.min,
            min_outside: limits.min_outside,
            max: limits.max,
        }
    }
}
