//! Grouping of rated observations into dense, age-ordered cohorts

mod index;

pub use index::{AgeRate, Cohort, CohortIndex, MAX_AGE};
