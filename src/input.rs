//! Load cleaned Year/Age/Gender/Population/Deaths records from CSV

use crate::error::LoadError;
use crate::rates::{Gender, RateObservation};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Default location of the cleaned input table
pub const DEFAULT_INPUT_PATH: &str = "data/usa_year_age_gender.csv";

/// Raw CSV row matching the cleaned input columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Population")]
    population: Option<f64>,
    #[serde(rename = "Deaths")]
    deaths: Option<f64>,
}

impl CsvRow {
    fn to_observation(self, line: u64) -> Result<RateObservation, LoadError> {
        let gender = Gender::parse_label(&self.gender).ok_or_else(|| LoadError::UnknownGender {
            value: self.gender.clone(),
            line,
        })?;

        Ok(RateObservation::new(self.year, self.age, gender, self.population, self.deaths))
    }
}

/// Load all observations from a CSV file
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<RateObservation>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_observations_from_reader(file)
}

/// Load observations from any reader (e.g., string buffer)
///
/// Empty Population or Deaths cells load as absent values.
pub fn load_observations_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RateObservation>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut observations = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: CsvRow = record.deserialize(Some(&headers))?;
        observations.push(row.to_observation(line)?);
    }

    log::debug!("loaded {} observations", observations.len());
    Ok(observations)
}
