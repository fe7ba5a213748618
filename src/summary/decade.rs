//! Life expectancy at birth by year, averaged by decade

use crate::life_table::SurvivalTable;
use crate::rates::Gender;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// e0 for one (year, gender) cohort
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancyAtBirth {
    pub year: i32,
    pub gender: Gender,
    pub e0: Option<f64>,
}

impl LifeExpectancyAtBirth {
    pub fn from_table(table: &SurvivalTable) -> Self {
        Self {
            year: table.key.year,
            gender: table.key.gender,
            e0: table.e0(),
        }
    }
}

/// Mean e0 over the years of one decade for one gender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecadeSummary {
    pub decade: i32,
    pub gender: Gender,
    pub avg_e0: f64,

    /// Number of years with a defined e0 that went into the mean
    pub years: usize,
}

/// Year rounded down to a multiple of ten
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecadeSummarizer;

impl DecadeSummarizer {
    /// Average e0 per (decade, gender)
    ///
    /// Years with an undefined e0 are left out of the mean, and a decade with
    /// no contributing years produces no row. Output is ordered by decade, then gender.
    pub fn summarize<I>(values: I) -> Vec<DecadeSummary>
    where
        I: IntoIterator<Item = LifeExpectancyAtBirth>,
    {
        let mut sums: BTreeMap<(i32, Gender), (f64, usize)> = BTreeMap::new();

        for value in values {
            if let Some(e0) = value.e0 {
                let entry = sums.entry((decade_of(value.year), value.gender)).or_insert((0.0, 0));
                entry.0 += e0;
                entry.1 += 1;
            }
        }

        sums.into_iter()
            .map(|((decade, gender), (sum, years))| DecadeSummary {
                decade,
                gender,
                avg_e0: sum / years as f64,
                years,
            })
            .collect()
    }

    /// e0 for each table, in the tables' order
    pub fn e0_by_year<'a, I>(tables: I) -> Vec<LifeExpectancyAtBirth>
    where
        I: IntoIterator<Item = &'a SurvivalTable>,
    {
        tables.into_iter().map(LifeExpectancyAtBirth::from_table).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn e0(year: i32, gender: Gender, e0: Option<f64>) -> LifeExpectancyAtBirth {
        LifeExpectancyAtBirth { year, gender, e0 }
    }

    #[test]
    fn test_decade_rounding() {
        assert_eq!(decade_of(1990), 1990);
        assert_eq!(decade_of(1999), 1990);
        assert_eq!(decade_of(2000), 2000);
        assert_eq!(decade_of(-5), -10);
    }

    #[test]
    fn test_partial_decade_averages_present_years_only() {
        let values: Vec<_> = (1990..=1994)
            .map(|y| e0(y, Gender::Male, Some(70.0 + (y - 1990) as f64)))
            .collect();

        let summary = DecadeSummarizer::summarize(values);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].decade, 1990);
        assert_eq!(summary[0].years, 5);
        assert_relative_eq!(summary[0].avg_e0, 72.0);
    }

    #[test]
    fn test_undefined_e0_excluded() {
        let summary = DecadeSummarizer::summarize(vec![
            e0(2001, Gender::Female, Some(80.0)),
            e0(2002, Gender::Female, None),
            e0(2003, Gender::Female, Some(82.0)),
        ]);
        assert_eq!(summary.len(), 1);
        assert_relative_eq!(summary[0].avg_e0, 81.0);
        assert_eq!(summary[0].years, 2);
    }

    #[test]
    fn test_decade_without_defined_years_has_no_row() {
        let summary = DecadeSummarizer::summarize(vec![
            e0(1985, Gender::Male, None),
            e0(1995, Gender::Male, Some(72.5)),
        ]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].decade, 1990);
    }

    #[test]
    fn test_ordered_by_decade_then_gender() {
        let summary = DecadeSummarizer::summarize(vec![
            e0(2010, Gender::Male, Some(76.0)),
            e0(2000, Gender::Male, Some(74.0)),
            e0(2000, Gender::Female, Some(79.0)),
        ]);
        let keys: Vec<_> = summary.iter().map(|s| (s.decade, s.gender)).collect();
        assert_eq!(
            keys,
            vec![(2000, Gender::Female), (2000, Gender::Male), (2010, Gender::Male)]
        );
    }
}
