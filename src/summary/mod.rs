//! Summaries derived from built life tables and rated observations

mod decade;
mod comparison;
mod trends;

pub use decade::{DecadeSummarizer, DecadeSummary, LifeExpectancyAtBirth, decade_of};
pub use comparison::{GenderComparison, compare_genders};
pub use trends::{AgeBandTrend, age_band_trends, DEFAULT_BAND_WIDTH};
