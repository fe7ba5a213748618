//! Backward pass: remaining person-years (Tx) and life expectancy (ex)

use super::rows::{LifeTableRow, SurvivalRow};

#[derive(Debug, Clone, Copy, Default)]
pub struct SurvivalAccumulator;

impl SurvivalAccumulator {
    /// Sum Lx from the oldest age down to each age
    ///
    /// Rows must be the complete, age-ordered output of the forward pass.
    pub fn accumulate(rows: Vec<LifeTableRow>) -> Vec<SurvivalRow> {
        let mut totals = vec![0.0; rows.len()];
        let mut running = 0.0;
        for (i, row) in rows.iter().enumerate().rev() {
            running += row.person_years;
            totals[i] = running;
        }

        rows.into_iter()
            .zip(totals)
            .map(|(row, tx)| SurvivalRow::from_row(row, tx))
            .collect()
    }
}
