//! Life table construction for one cohort
//!
//! Two sequential passes per cohort:
//! 1. Forward recurrence from the radix at age 0: lx, dx, Lx ([`LifeTableBuilder`])
//! 2. Backward running sum of Lx: Tx and ex ([`SurvivalAccumulator`])

mod config;
mod rows;
mod builder;
mod survival;

pub use config::{LifeTableConfig, DEFAULT_RADIX, DEFAULT_AX};
pub use rows::{LifeTableRow, SurvivalRow, SurvivalTable};
pub use builder::LifeTableBuilder;
pub use survival::SurvivalAccumulator;

use crate::cohort::Cohort;
use crate::error::LifeTableResult;

/// Build the complete survival table for one cohort
pub fn build_life_table(cohort: &Cohort, config: &LifeTableConfig) -> LifeTableResult<SurvivalTable> {
    let rows = LifeTableBuilder::new(*config)?.build(cohort)?;
    Ok(SurvivalTable::new(cohort.key(), SurvivalAccumulator::accumulate(rows)))
}
