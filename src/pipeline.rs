//! End-to-end run: observations -> cohorts -> life tables -> summaries
//!
//! Cohorts are independent, so tables are built in parallel. Results are
//! collected into ordered maps so repeated runs give identical output.

use crate::cohort::{Cohort, CohortIndex};
use crate::error::{LifeTableError, LifeTableResult};
use crate::life_table::{build_life_table, LifeTableConfig, SurvivalTable};
use crate::rates::{CohortKey, RateObservation, RatedObservation};
use crate::summary::{
    age_band_trends, compare_genders, AgeBandTrend, DecadeSummarizer, DecadeSummary,
    GenderComparison, LifeExpectancyAtBirth, DEFAULT_BAND_WIDTH,
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Configuration for a pipeline run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub life_table: LifeTableConfig,

    /// Width in years of the age bands used for mx trends
    pub age_band_width: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            life_table: LifeTableConfig::default(),
            age_band_width: DEFAULT_BAND_WIDTH,
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// One survival table per accepted cohort
    pub tables: BTreeMap<CohortKey, SurvivalTable>,

    /// Cohorts whose computation was aborted
    pub failures: BTreeMap<CohortKey, LifeTableError>,

    pub e0_by_year: Vec<LifeExpectancyAtBirth>,
    pub decades: Vec<DecadeSummary>,
    pub gender_comparison: Vec<GenderComparison>,
    pub age_band_trends: Vec<AgeBandTrend>,

    /// Observations of the accepted cohorts with their rates, ordered by (year, age, gender)
    pub rates: Vec<RatedObservation>,
}

impl PipelineOutput {
    pub fn table(&self, year: i32, gender: crate::rates::Gender) -> Option<&SurvivalTable> {
        self.tables.get(&CohortKey::new(year, gender))
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.tables.keys().map(|k| k.year).max()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LifeTablePipeline {
    config: PipelineConfig,
}

impl LifeTablePipeline {
    pub fn new(config: PipelineConfig) -> LifeTableResult<Self> {
        config.life_table.validate()?;
        Ok(Self { config })
    }

    /// Run every stage over a full set of observations
    pub fn run<I>(&self, observations: I) -> PipelineOutput
    where
        I: IntoIterator<Item = RateObservation>,
    {
        self.run_index(&CohortIndex::build(observations))
    }

    /// Run the table and summary stages over an already built index
    pub fn run_index(&self, index: &CohortIndex) -> PipelineOutput {
        let cohorts: Vec<&Cohort> = index.valid().collect();
        let built: Vec<(CohortKey, LifeTableResult<SurvivalTable>)> = cohorts
            .par_iter()
            .map(|cohort| (cohort.key(), build_life_table(cohort, &self.config.life_table)))
            .collect();

        let mut failures: BTreeMap<CohortKey, LifeTableError> = index
            .rejected()
            .map(|(key, err)| (*key, err.clone()))
            .collect();
        let mut tables = BTreeMap::new();
        for (key, result) in built {
            match result {
                Ok(table) => {
                    tables.insert(key, table);
                }
                Err(err) => {
                    log::warn!("life table for cohort {} failed: {}", key, err);
                    failures.insert(key, err);
                }
            }
        }

        // Reports only see observations of cohorts that produced a table
        let rates: Vec<RatedObservation> = index
            .rated_observations()
            .iter()
            .filter(|r| tables.contains_key(&r.observation.cohort()))
            .cloned()
            .collect();

        let e0_by_year = DecadeSummarizer::e0_by_year(tables.values());
        let decades = DecadeSummarizer::summarize(e0_by_year.iter().copied());
        let gender_comparison = compare_genders(&rates);
        let age_band_trends = age_band_trends(&rates, self.config.age_band_width);

        log::info!(
            "built {} life tables, rejected {} cohorts, {} decade summaries",
            tables.len(),
            failures.len(),
            decades.len()
        );

        PipelineOutput {
            tables,
            failures,
            e0_by_year,
            decades,
            gender_comparison,
            age_band_trends,
            rates,
        }
    }
}
