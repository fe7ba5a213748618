//! Cohort index keyed by (year, gender)
//!
//! Each cohort is a dense array indexed by age from 0 up to the highest observed
//! age. Ages without an observation, or whose rates are undefined, stay in the
//! array with no qx; the life table treats them as zero mortality.

use crate::error::{LifeTableError, LifeTableResult};
use crate::rates::{CohortKey, ObservationKey, RateConverter, RateObservation, RatedObservation};
use std::collections::BTreeMap;

/// Highest age a cohort may contain
pub const MAX_AGE: u32 = 150;

/// Rate information for one age within a cohort
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRate {
    pub age: u32,

    /// Whether an observation exists for this age
    pub observed: bool,

    pub mx: Option<f64>,
    pub qx: Option<f64>,
}

impl AgeRate {
    /// Placeholder for an age with no observation
    pub fn gap(age: u32) -> Self {
        Self { age, observed: false, mx: None, qx: None }
    }

    /// qx used by the recurrence; missing rates mean no deaths at this age
    pub fn qx_or_default(&self) -> f64 {
        self.qx.unwrap_or(0.0)
    }
}

/// One (year, gender) cohort with ages 0..=max_age in order
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    key: CohortKey,
    ages: Vec<AgeRate>,
}

impl Cohort {
    /// Build a cohort directly from qx values indexed by age
    ///
    /// `None` entries are treated like ages with no observation. Fails with
    /// `MalformedInput` on a qx outside [0, 1] or more than `MAX_AGE + 1` ages.
    pub fn from_qx(key: CohortKey, qx: &[Option<f64>]) -> LifeTableResult<Self> {
        if qx.len() > MAX_AGE as usize + 1 {
            return Err(LifeTableError::MalformedInput {
                key: ObservationKey { year: key.year, age: MAX_AGE + 1, gender: key.gender },
                reason: format!("age exceeds the maximum of {}", MAX_AGE),
            });
        }

        let mut ages = Vec::with_capacity(qx.len());
        for (age, q) in qx.iter().enumerate() {
            let age = age as u32;
            if let Some(value) = q {
                if !(0.0..=1.0).contains(value) {
                    return Err(LifeTableError::MalformedInput {
                        key: ObservationKey { year: key.year, age, gender: key.gender },
                        reason: format!("qx {} is outside [0, 1]", value),
                    });
                }
            }
            ages.push(AgeRate { age, observed: q.is_some(), mx: None, qx: *q });
        }
        Ok(Self { key, ages })
    }

    /// Build a cohort from observations that all belong to `key`
    ///
    /// Fails with `MalformedInput` on a negative or non-finite count, an age
    /// above `MAX_AGE`, a duplicate age, or an observation from another cohort.
    pub fn from_observations(
        key: CohortKey,
        mut observations: Vec<RateObservation>,
    ) -> LifeTableResult<(Self, Vec<RatedObservation>)> {
        observations.sort_by_key(|o| o.age);

        let mut rated: Vec<RatedObservation> = Vec::with_capacity(observations.len());
        for obs in observations {
            if obs.cohort() != key {
                return Err(LifeTableError::MalformedInput {
                    key: obs.key(),
                    reason: format!("observation does not belong to cohort {}", key),
                });
            }
            obs.validate().map_err(|reason| LifeTableError::MalformedInput {
                key: obs.key(),
                reason,
            })?;
            if obs.age > MAX_AGE {
                return Err(LifeTableError::MalformedInput {
                    key: obs.key(),
                    reason: format!("age exceeds the maximum of {}", MAX_AGE),
                });
            }
            if rated.last().is_some_and(|prev| prev.observation.age == obs.age) {
                return Err(LifeTableError::MalformedInput {
                    key: obs.key(),
                    reason: "duplicate observation for this year, age and gender".to_string(),
                });
            }
            rated.push(RateConverter::rate(obs));
        }

        let max_age = match rated.last() {
            Some(last) => last.observation.age,
            None => return Ok((Self { key, ages: Vec::new() }, rated)),
        };

        let mut ages: Vec<AgeRate> = (0..=max_age).map(AgeRate::gap).collect();
        for r in &rated {
            ages[r.observation.age as usize] = AgeRate {
                age: r.observation.age,
                observed: true,
                mx: r.rates.mx,
                qx: r.rates.qx,
            };
        }

        Ok((Self { key, ages }, rated))
    }

    pub fn key(&self) -> CohortKey {
        self.key
    }

    pub fn ages(&self) -> &[AgeRate] {
        &self.ages
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Highest age in the cohort (the highest observed age)
    pub fn max_age(&self) -> Option<u32> {
        self.ages.last().map(|a| a.age)
    }

    /// Ages with no observation at all
    pub fn gaps(&self) -> Vec<u32> {
        self.ages.iter().filter(|a| !a.observed).map(|a| a.age).collect()
    }

    /// Ages whose qx falls back to the zero default (gaps and undefined rates)
    pub fn defaulted_ages(&self) -> Vec<u32> {
        self.ages.iter().filter(|a| a.qx.is_none()).map(|a| a.age).collect()
    }
}

/// All cohorts built from one set of observations
///
/// Cohorts that fail validation are kept as errors under their key so the
/// remaining cohorts are unaffected.
#[derive(Debug, Clone, Default)]
pub struct CohortIndex {
    cohorts: BTreeMap<CohortKey, LifeTableResult<Cohort>>,
    rated: Vec<RatedObservation>,
}

impl CohortIndex {
    pub fn build<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = RateObservation>,
    {
        let mut grouped: BTreeMap<CohortKey, Vec<RateObservation>> = BTreeMap::new();
        for obs in observations {
            grouped.entry(obs.cohort()).or_default().push(obs);
        }

        let mut cohorts = BTreeMap::new();
        let mut rated = Vec::new();
        for (key, group) in grouped {
            match Cohort::from_observations(key, group) {
                Ok((cohort, mut cohort_rated)) => {
                    let defaulted = cohort.defaulted_ages().len();
                    if defaulted > 0 {
                        log::debug!(
                            "cohort {}: {} of {} ages default to qx = 0",
                            key,
                            defaulted,
                            cohort.len()
                        );
                    }
                    rated.append(&mut cohort_rated);
                    cohorts.insert(key, Ok(cohort));
                }
                Err(err) => {
                    log::warn!("rejecting cohort {}: {}", key, err);
                    cohorts.insert(key, Err(err));
                }
            }
        }

        rated.sort_by_key(|r| r.observation.key());

        Self { cohorts, rated }
    }

    /// Successfully built cohorts in (year, gender) order
    pub fn valid(&self) -> impl Iterator<Item = &Cohort> {
        self.cohorts.values().filter_map(|c| c.as_ref().ok())
    }

    /// Rejected cohorts with their errors
    pub fn rejected(&self) -> impl Iterator<Item = (&CohortKey, &LifeTableError)> {
        self.cohorts
            .iter()
            .filter_map(|(k, c)| c.as_ref().err().map(|e| (k, e)))
    }

    pub fn get(&self, key: &CohortKey) -> Option<&LifeTableResult<Cohort>> {
        self.cohorts.get(key)
    }

    /// Rated observations of the accepted cohorts, ordered by (year, age, gender)
    pub fn rated_observations(&self) -> &[RatedObservation] {
        &self.rated
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}
