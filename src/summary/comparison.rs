//! Male vs female central death rates for each (year, age)

use crate::rates::{Gender, RatedObservation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderComparison {
    pub year: i32,
    pub age: u32,
    pub mx_male: Option<f64>,
    pub mx_female: Option<f64>,

    /// mx_male - mx_female, when both are defined
    pub mx_diff: Option<f64>,
}

/// Pair up male and female observations of the same (year, age)
///
/// Cells observed for only one gender are skipped. Ordered by (year, age).
pub fn compare_genders(observations: &[RatedObservation]) -> Vec<GenderComparison> {
    // (male, female); outer Option = observed, inner Option = mx defined
    let mut cells: BTreeMap<(i32, u32), (Option<Option<f64>>, Option<Option<f64>>)> = BTreeMap::new();

    for rated in observations {
        let obs = &rated.observation;
        let cell = cells.entry((obs.year, obs.age)).or_default();
        match obs.gender {
            Gender::Male => cell.0 = Some(rated.rates.mx),
            Gender::Female => cell.1 = Some(rated.rates.mx),
        }
    }

    cells
        .into_iter()
        .filter_map(|((year, age), cell)| match cell {
            (Some(mx_male), Some(mx_female)) => Some(GenderComparison {
                year,
                age,
                mx_male,
                mx_female,
                mx_diff: mx_male.zip(mx_female).map(|(m, f)| m - f),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{RateConverter, RateObservation};
    use approx::assert_relative_eq;

    fn rated(year: i32, age: u32, gender: Gender, pop: Option<f64>, deaths: f64) -> RatedObservation {
        RateConverter::rate(RateObservation::new(year, age, gender, pop, Some(deaths)))
    }

    #[test]
    fn test_difference_of_matching_cells() {
        let rows = compare_genders(&[
            rated(2000, 0, Gender::Male, Some(1000.0), 8.0),
            rated(2000, 0, Gender::Female, Some(1000.0), 6.0),
            rated(2000, 1, Gender::Male, Some(1000.0), 1.0),
        ]);

        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].year, rows[0].age), (2000, 0));
        assert_relative_eq!(rows[0].mx_diff.unwrap(), 0.002, epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_rate_gives_no_difference() {
        let rows = compare_genders(&[
            rated(2000, 5, Gender::Male, Some(0.0), 0.0),
            rated(2000, 5, Gender::Female, Some(1000.0), 1.0),
        ]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mx_male, None);
        assert_relative_eq!(rows[0].mx_female.unwrap(), 0.001);
        assert_eq!(rows[0].mx_diff, None);
    }

    #[test]
    fn test_ordered_by_year_then_age() {
        let rows = compare_genders(&[
            rated(2001, 0, Gender::Female, Some(10.0), 1.0),
            rated(2001, 0, Gender::Male, Some(10.0), 1.0),
            rated(2000, 3, Gender::Male, Some(10.0), 1.0),
            rated(2000, 3, Gender::Female, Some(10.0), 1.0),
        ]);
        let keys: Vec<_> = rows.iter().map(|r| (r.year, r.age)).collect();
        assert_eq!(keys, vec![(2000, 3), (2001, 0)]);
    }
}
