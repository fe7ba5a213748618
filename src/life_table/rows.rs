//! Life table output structures

use crate::rates::CohortKey;
use serde::{Deserialize, Serialize};

/// Forward-pass row for one age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeTableRow {
    pub age: u32,

    /// Probability of death used by the recurrence (0 when defaulted)
    pub qx: f64,
    pub px: f64,

    /// lx: survivors at the start of the age
    pub survivors: f64,

    /// dx: deaths within the age
    pub deaths: f64,

    /// Lx: person-years lived within the age
    pub person_years: f64,

    /// lx - dx, the survivors entering the next age
    pub survivors_next: f64,

    /// False when qx fell back to the zero default
    pub rate_observed: bool,
}

/// Final row for one age, with remaining person-years and life expectancy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalRow {
    pub age: u32,
    pub qx: f64,
    pub px: f64,
    pub survivors: f64,
    pub deaths: f64,
    pub person_years: f64,
    pub survivors_next: f64,
    pub rate_observed: bool,

    /// Tx: person-years remaining from this age to the end of the table
    pub total_person_years: f64,

    /// ex = Tx / lx; `None` once the cohort is exhausted
    pub life_expectancy: Option<f64>,
}

impl SurvivalRow {
    pub fn from_row(row: LifeTableRow, total_person_years: f64) -> Self {
        let life_expectancy = if row.survivors > 0.0 {
            Some(total_person_years / row.survivors)
        } else {
            None
        };

        Self {
            age: row.age,
            qx: row.qx,
            px: row.px,
            survivors: row.survivors,
            deaths: row.deaths,
            person_years: row.person_years,
            survivors_next: row.survivors_next,
            rate_observed: row.rate_observed,
            total_person_years,
            life_expectancy,
        }
    }
}

/// The complete table for one cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalTable {
    pub key: CohortKey,
    pub rows: Vec<SurvivalRow>,
}

impl SurvivalTable {
    pub fn new(key: CohortKey, rows: Vec<SurvivalRow>) -> Self {
        Self { key, rows }
    }

    /// Row for a given age (rows are indexed by age)
    pub fn row(&self, age: u32) -> Option<&SurvivalRow> {
        self.rows.get(age as usize)
    }

    /// Life expectancy at birth
    pub fn e0(&self) -> Option<f64> {
        self.row(0).and_then(|r| r.life_expectancy)
    }
}
