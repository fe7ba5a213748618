//! Average central death rate per age band, year and gender

use crate::rates::{Gender, RatedObservation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_BAND_WIDTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBandTrend {
    pub year: i32,
    pub gender: Gender,

    /// First age of the band (a multiple of the band width)
    pub band_start: u32,

    /// Mean of the defined mx values in the band
    pub avg_mx: Option<f64>,
}

/// Group observations into fixed-width age bands
///
/// Undefined rates are ignored by the mean; a band with no defined rate
/// still appears, with `avg_mx` of `None`. A zero width is treated as 1.
pub fn age_band_trends(observations: &[RatedObservation], band_width: u32) -> Vec<AgeBandTrend> {
    let width = band_width.max(1);
    let mut bands: BTreeMap<(i32, Gender, u32), (f64, usize)> = BTreeMap::new();

    for rated in observations {
        let obs = &rated.observation;
        let entry = bands
            .entry((obs.year, obs.gender, (obs.age / width) * width))
            .or_insert((0.0, 0));
        if let Some(mx) = rated.rates.mx {
            entry.0 += mx;
            entry.1 += 1;
        }
    }

    bands
        .into_iter()
        .map(|((year, gender, band_start), (sum, count))| AgeBandTrend {
            year,
            gender,
            band_start,
            avg_mx: (count > 0).then(|| sum / count as f64),
        })
        .collect()
}
