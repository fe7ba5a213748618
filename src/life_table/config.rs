//! Life table assumptions

use crate::error::{LifeTableError, LifeTableResult};
use serde::{Deserialize, Serialize};

/// Starting size of the hypothetical cohort
pub const DEFAULT_RADIX: f64 = 100_000.0;

/// Fraction of the year lived by those dying within it (uniform deaths)
pub const DEFAULT_AX: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeTableConfig {
    /// l0
    pub radix: f64,

    /// Average fraction of the age interval lived by those who die in it
    pub ax: f64,
}

impl Default for LifeTableConfig {
    fn default() -> Self {
        Self {
            radix: DEFAULT_RADIX,
            ax: DEFAULT_AX,
        }
    }
}

impl LifeTableConfig {
    pub fn with_radix(mut self, radix: f64) -> Self {
        self.radix = radix;
        self
    }

    pub fn validate(&self) -> LifeTableResult<()> {
        if !self.radix.is_finite() || self.radix <= 0.0 {
            return Err(LifeTableError::InvalidConfig(format!(
                "radix must be a positive finite number, got {}",
                self.radix
            )));
        }
        if !(0.0..=1.0).contains(&self.ax) {
            return Err(LifeTableError::InvalidConfig(format!(
                "ax must lie in [0, 1], got {}",
                self.ax
            )));
        }
        Ok(())
    }
}
