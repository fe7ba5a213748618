//! Observation records keyed by calendar year, single year of age and gender

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender of a cohort
///
/// Ordering is alphabetical so sorted outputs list Female before Male.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    /// Parse the labels used by the cleaned input files
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one cohort: a calendar year and gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CohortKey {
    pub year: i32,
    pub gender: Gender,
}

impl CohortKey {
    pub fn new(year: i32, gender: Gender) -> Self {
        Self { year, gender }
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.year, self.gender)
    }
}

/// Identifies one observation cell: (year, age, gender)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObservationKey {
    pub year: i32,
    pub age: u32,
    pub gender: Gender,
}

impl ObservationKey {
    pub fn cohort(&self) -> CohortKey {
        CohortKey::new(self.year, self.gender)
    }
}

impl fmt::Display for ObservationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(year {}, age {}, {})", self.year, self.age, self.gender)
    }
}

/// A single observed cell of population exposure and deaths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    /// Calendar year of the observation
    pub year: i32,

    /// Single year of age
    pub age: u32,

    pub gender: Gender,

    /// Mid-period population, if reported
    pub population: Option<f64>,

    /// Deaths during the period, if reported
    pub deaths: Option<f64>,
}

impl RateObservation {
    pub fn new(
        year: i32,
        age: u32,
        gender: Gender,
        population: Option<f64>,
        deaths: Option<f64>,
    ) -> Self {
        Self { year, age, gender, population, deaths }
    }

    pub fn key(&self) -> ObservationKey {
        ObservationKey { year: self.year, age: self.age, gender: self.gender }
    }

    pub fn cohort(&self) -> CohortKey {
        CohortKey::new(self.year, self.gender)
    }

    /// Check the non-negativity invariant on the numeric fields
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("population", self.population), ("deaths", self.deaths)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(format!("{} is not finite ({})", name, v));
                }
                if v < 0.0 {
                    return Err(format!("{} is negative ({})", name, v));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_labels() {
        assert_eq!(Gender::parse_label("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse_label(" f "), Some(Gender::Female));
        assert_eq!(Gender::parse_label("both"), None);
        assert_eq!(Gender::Female.to_string(), "Female");
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let ok = RateObservation::new(2000, 10, Gender::Male, Some(1000.0), None);
        assert!(ok.validate().is_ok());

        let negative = RateObservation::new(2000, 10, Gender::Male, Some(1000.0), Some(-1.0));
        assert!(negative.validate().unwrap_err().contains("deaths"));

        let nan = RateObservation::new(2000, 10, Gender::Male, Some(f64::NAN), Some(1.0));
        assert!(nan.validate().unwrap_err().contains("population"));
    }

    #[test]
    fn test_cohort_key_ordering() {
        let mut keys = vec![
            CohortKey::new(2001, Gender::Female),
            CohortKey::new(2000, Gender::Male),
            CohortKey::new(2000, Gender::Female),
        ];
        keys.sort();
        assert_eq!(keys[0], CohortKey::new(2000, Gender::Female));
        assert_eq!(keys[1], CohortKey::new(2000, Gender::Male));
        assert_eq!(keys[2], CohortKey::new(2001, Gender::Female));
    }
}
