//! Forward recurrence: survivors, deaths and person-years by age

use super::config::LifeTableConfig;
use super::rows::LifeTableRow;
use crate::cohort::Cohort;
use crate::error::{LifeTableError, LifeTableResult};

/// Builds lx, dx and Lx for a cohort, age by age from the radix at age 0
#[derive(Debug, Clone, Copy)]
pub struct LifeTableBuilder {
    config: LifeTableConfig,
}

impl Default for LifeTableBuilder {
    fn default() -> Self {
        Self { config: LifeTableConfig::default() }
    }
}

impl LifeTableBuilder {
    pub fn new(config: LifeTableConfig) -> LifeTableResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the recurrence over every age of the cohort
    ///
    /// The table stops at the cohort's highest observed age; no closeout is
    /// applied to the final age.
    pub fn build(&self, cohort: &Cohort) -> LifeTableResult<Vec<LifeTableRow>> {
        if cohort.is_empty() {
            return Err(LifeTableError::EmptyCohort { key: cohort.key() });
        }

        let mut rows = Vec::with_capacity(cohort.len());
        let mut survivors = self.config.radix;

        for age_rate in cohort.ages() {
            let row = self.step(age_rate.age, survivors, age_rate.qx_or_default(), age_rate.qx.is_some());
            survivors = row.survivors_next;
            rows.push(row);
        }

        Ok(rows)
    }

    /// One step of the recurrence
    ///
    /// dx is taken as lx - lx_next so that the identity holds exactly in
    /// floating point, and lx_next never goes below zero.
    fn step(&self, age: u32, survivors: f64, qx: f64, rate_observed: bool) -> LifeTableRow {
        let survivors_next = (survivors - survivors * qx).max(0.0);
        let deaths = survivors - survivors_next;
        let person_years = survivors - (1.0 - self.config.ax) * deaths;

        LifeTableRow {
            age,
            qx,
            px: 1.0 - qx,
            survivors,
            deaths,
            person_years,
            survivors_next,
            rate_observed,
        }
    }
}
