//! Life Tables - Period life tables and life expectancy summaries from mortality counts
//!
//! This library provides:
//! - Conversion of population and death counts into mx and qx
//! - Grouping of observations into (year, gender) cohorts with gap filling
//! - Life table construction (lx, dx, Lx, Tx, ex) from a 100,000 radix
//! - Life expectancy at birth by year and by decade, gender comparisons, age-band trends
//! - CSV loading and export around the pure computation core

pub mod error;
pub mod rates;
pub mod cohort;
pub mod life_table;
pub mod summary;
pub mod pipeline;
pub mod input;
pub mod export;

// Re-export commonly used types
pub use error::{LifeTableError, LifeTableResult, LoadError};
pub use rates::{RateObservation, Gender, CohortKey, RateConverter};
pub use cohort::{Cohort, CohortIndex};
pub use life_table::{build_life_table, LifeTableBuilder, LifeTableConfig, SurvivalAccumulator, SurvivalRow, SurvivalTable};
pub use summary::{DecadeSummarizer, DecadeSummary};
pub use pipeline::{LifeTablePipeline, PipelineConfig, PipelineOutput};
