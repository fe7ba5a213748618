//! Central death rate (mx) and probability of death (qx) from raw counts
//!
//! mx = deaths / population, defined only when population is reported and non-zero.
//! qx = 1 - exp(-mx), clamped into [0, 1].

use super::RateObservation;
use serde::{Deserialize, Serialize};

/// Derived rates for one observation; `None` marks an undefined rate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rates {
    pub mx: Option<f64>,
    pub qx: Option<f64>,
}

/// An observation paired with its derived rates
#[derive(Debug, Clone, PartialEq)]
pub struct RatedObservation {
    pub observation: RateObservation,
    pub rates: Rates,
}

/// Converts (population, deaths) pairs into mortality rates
#[derive(Debug, Clone, Copy, Default)]
pub struct RateConverter;

impl RateConverter {
    /// Central mortality rate
    ///
    /// Undefined when population is absent or not positive. Absent deaths with a
    /// usable population count as zero deaths.
    pub fn central_rate(population: Option<f64>, deaths: Option<f64>) -> Option<f64> {
        match population {
            Some(pop) if pop > 0.0 => Some(deaths.unwrap_or(0.0) / pop),
            _ => None,
        }
    }

    /// Annual probability of death from a central rate, clamped into [0, 1]
    pub fn probability_of_death(mx: f64) -> f64 {
        let qx = 1.0 - (-mx).exp();
        if qx.is_nan() || qx < 0.0 {
            0.0
        } else if qx > 1.0 {
            1.0
        } else {
            qx
        }
    }

    /// Convert a single observation
    pub fn convert(observation: &RateObservation) -> Rates {
        let mx = Self::central_rate(observation.population, observation.deaths);
        Rates {
            mx,
            qx: mx.map(Self::probability_of_death),
        }
    }

    /// Convert an observation, keeping it alongside its rates
    pub fn rate(observation: RateObservation) -> RatedObservation {
        let rates = Self::convert(&observation);
        RatedObservation { observation, rates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::Gender;
    use approx::assert_relative_eq;

    fn obs(population: Option<f64>, deaths: Option<f64>) -> RateObservation {
        RateObservation::new(2000, 40, Gender::Female, population, deaths)
    }

    #[test]
    fn test_standard_conversion() {
        let rates = RateConverter::convert(&obs(Some(10_000.0), Some(50.0)));
        assert_relative_eq!(rates.mx.unwrap(), 0.005);
        assert_relative_eq!(rates.qx.unwrap(), 1.0 - (-0.005f64).exp());
    }

    #[test]
    fn test_zero_or_absent_population_is_undefined() {
        assert_eq!(RateConverter::convert(&obs(Some(0.0), Some(3.0))), Rates::default());
        assert_eq!(RateConverter::convert(&obs(None, Some(3.0))), Rates::default());
        assert_eq!(RateConverter::convert(&obs(None, None)), Rates::default());
    }

    #[test]
    fn test_absent_deaths_with_population_is_zero_rate() {
        let rates = RateConverter::convert(&obs(Some(500.0), None));
        assert_eq!(rates.mx, Some(0.0));
        assert_eq!(rates.qx, Some(0.0));
    }

    #[test]
    fn test_qx_stays_in_unit_interval() {
        for mx in [0.0, 1e-9, 0.5, 3.0, 50.0, 1e6, f64::INFINITY] {
            let qx = RateConverter::probability_of_death(mx);
            assert!((0.0..=1.0).contains(&qx), "qx {} out of range for mx {}", qx, mx);
        }
        assert_eq!(RateConverter::probability_of_death(f64::INFINITY), 1.0);
        assert_eq!(RateConverter::probability_of_death(-2.0), 0.0);
        assert_eq!(RateConverter::probability_of_death(f64::NAN), 0.0);
    }

    #[test]
    fn test_deaths_exceeding_population() {
        let rates = RateConverter::convert(&obs(Some(10.0), Some(40.0)));
        assert_relative_eq!(rates.mx.unwrap(), 4.0);
        let qx = rates.qx.unwrap();
        assert!(qx < 1.0 && qx > 0.98);
    }
}
