//! Integer price in minor units.
//!
//! The wire contract carries `float` and stored documents carry `double`. Both are
//! converted here, rounding to the nearest minor unit; nothing else in the crate does
//! float arithmetic on prices.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Minor units per major unit (hundredths).
pub const MINOR_PER_MAJOR: i64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Lossy conversion from a major-unit float.
    ///
    /// Returns `None` for NaN, infinities, and values whose minor units do not fit in `i64`.
    pub fn from_major_lossy(major: f64) -> Option<Self> {
        if !major.is_finite() {
            return None;
        }
        let minor = (major * MINOR_PER_MAJOR as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if minor < i64::MIN as f64 || minor >= i64::MAX as f64 {
            return None;
        }
        Some(Self(minor as i64))
    }

    /// Lossy conversion to a major-unit float.
    pub fn to_major_lossy(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{sign}{}.{:02}", abs / per, abs % per)
    }
}
