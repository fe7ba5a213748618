//! CSV and JSON writers for pipeline outputs
//!
//! Column names follow the tables consumed by the spreadsheet and chart tooling.

use crate::life_table::SurvivalTable;
use crate::pipeline::PipelineOutput;
use crate::rates::{Gender, RatedObservation};
use crate::summary::{AgeBandTrend, DecadeSummary, GenderComparison, LifeExpectancyAtBirth};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LIFE_TABLES_FILE: &str = "life_tables.csv";
pub const RATES_FILE: &str = "mortality_rates.csv";
pub const E0_BY_YEAR_FILE: &str = "e0_by_year.csv";
pub const E0_BY_DECADE_FILE: &str = "e0_by_decade.csv";
pub const GENDER_COMPARISON_FILE: &str = "gender_mortality_comparison.csv";
pub const AGE_BAND_TRENDS_FILE: &str = "agegroup_trends.csv";

#[derive(Debug, Serialize)]
struct LifeTableRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Gender")]
    gender: Gender,
    #[serde(rename = "Age")]
    age: u32,
    qx: f64,
    px: f64,
    lx: f64,
    dx: f64,
    #[serde(rename = "Lx")]
    big_lx: f64,
    lx_next: f64,
    #[serde(rename = "Tx")]
    tx: f64,
    ex: Option<f64>,
    #[serde(rename = "RateObserved")]
    rate_observed: bool,
}

#[derive(Debug, Serialize)]
struct RateRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Gender")]
    gender: Gender,
    #[serde(rename = "Population")]
    population: Option<f64>,
    #[serde(rename = "Deaths")]
    deaths: Option<f64>,
    #[serde(rename = "MortalityRate")]
    mx: Option<f64>,
    qx_est: Option<f64>,
}

#[derive(Debug, Serialize)]
struct E0Record {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Gender")]
    gender: Gender,
    e0: Option<f64>,
}

#[derive(Debug, Serialize)]
struct DecadeRecord {
    #[serde(rename = "Decade")]
    decade: i32,
    #[serde(rename = "Gender")]
    gender: Gender,
    avg_e0: f64,
    #[serde(rename = "Years")]
    years: usize,
}

#[derive(Debug, Serialize)]
struct ComparisonRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Age")]
    age: u32,
    mx_male: Option<f64>,
    mx_female: Option<f64>,
    mx_diff: Option<f64>,
}

#[derive(Debug, Serialize)]
struct AgeBandRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Gender")]
    gender: Gender,
    #[serde(rename = "AgeGroupStart")]
    band_start: u32,
    avg_mx_band: Option<f64>,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn write_records<W, T, I>(writer: W, records: I) -> csv::Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// One row per (cohort, age), cohorts in the iterator's order
pub fn write_life_tables<'a, W, I>(writer: W, tables: I) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a SurvivalTable>,
{
    let records = tables.into_iter().flat_map(|table| {
        table.rows.iter().map(move |row| LifeTableRecord {
            year: table.key.year,
            gender: table.key.gender,
            age: row.age,
            qx: row.qx,
            px: row.px,
            lx: row.survivors,
            dx: row.deaths,
            big_lx: row.person_years,
            lx_next: row.survivors_next,
            tx: row.total_person_years,
            ex: row.life_expectancy,
            rate_observed: row.rate_observed,
        })
    });
    write_records(writer, records)
}

pub fn write_rates<W: Write>(writer: W, rates: &[RatedObservation]) -> csv::Result<()> {
    write_records(
        writer,
        rates.iter().map(|r| RateRecord {
            year: r.observation.year,
            age: r.observation.age,
            gender: r.observation.gender,
            population: r.observation.population,
            deaths: r.observation.deaths,
            mx: r.rates.mx,
            qx_est: r.rates.qx,
        }),
    )
}

pub fn write_e0_by_year<W: Write>(writer: W, values: &[LifeExpectancyAtBirth]) -> csv::Result<()> {
    write_records(
        writer,
        values.iter().map(|v| E0Record { year: v.year, gender: v.gender, e0: v.e0 }),
    )
}

/// avg_e0 is rounded to three decimals in the file
pub fn write_decades<W: Write>(writer: W, decades: &[DecadeSummary]) -> csv::Result<()> {
    write_records(
        writer,
        decades.iter().map(|d| DecadeRecord {
            decade: d.decade,
            gender: d.gender,
            avg_e0: round3(d.avg_e0),
            years: d.years,
        }),
    )
}

pub fn write_decades_json<W: Write>(writer: W, decades: &[DecadeSummary]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, decades)
}

pub fn write_gender_comparison<W: Write>(writer: W, rows: &[GenderComparison]) -> csv::Result<()> {
    write_records(
        writer,
        rows.iter().map(|r| ComparisonRecord {
            year: r.year,
            age: r.age,
            mx_male: r.mx_male,
            mx_female: r.mx_female,
            mx_diff: r.mx_diff,
        }),
    )
}

pub fn write_age_band_trends<W: Write>(writer: W, rows: &[AgeBandTrend]) -> csv::Result<()> {
    write_records(
        writer,
        rows.iter().map(|r| AgeBandRecord {
            year: r.year,
            gender: r.gender,
            band_start: r.band_start,
            avg_mx_band: r.avg_mx,
        }),
    )
}

/// Write every CSV output into `dir`, creating it if needed
///
/// Returns the paths written.
pub fn write_all(dir: &Path, output: &PipelineOutput) -> csv::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let create = |name: &str| -> csv::Result<(PathBuf, std::fs::File)> {
        let path = dir.join(name);
        let file = std::fs::File::create(&path)?;
        Ok((path, file))
    };

    let mut written = Vec::new();

    let (path, file) = create(LIFE_TABLES_FILE)?;
    write_life_tables(file, output.tables.values())?;
    written.push(path);

    let (path, file) = create(RATES_FILE)?;
    write_rates(file, &output.rates)?;
    written.push(path);

    let (path, file) = create(E0_BY_YEAR_FILE)?;
    write_e0_by_year(file, &output.e0_by_year)?;
    written.push(path);

    let (path, file) = create(E0_BY_DECADE_FILE)?;
    write_decades(file, &output.decades)?;
    written.push(path);

    let (path, file) = create(GENDER_COMPARISON_FILE)?;
    write_gender_comparison(file, &output.gender_comparison)?;
    written.push(path);

    let (path, file) = create(AGE_BAND_TRENDS_FILE)?;
    write_age_band_trends(file, &output.age_band_trends)?;
    written.push(path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::Cohort;
    use crate::life_table::{build_life_table, LifeTableConfig};
    use crate::rates::CohortKey;

    #[test]
    fn test_life_table_csv_layout() {
        let cohort = Cohort::from_qx(CohortKey::new(2000, Gender::Male), &[Some(0.5), Some(1.0), None]).unwrap();
        let table = build_life_table(&cohort, &LifeTableConfig::default()).unwrap();

        let mut buf = Vec::new();
        write_life_tables(&mut buf, [&table]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Year,Gender,Age,qx,px,lx,dx,Lx,lx_next,Tx,ex,RateObserved");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2000,Male,0,0.5,0.5,100000.0,50000.0,"));
        // exhausted cohort: ex is left empty
        assert!(lines[3].ends_with(",,false"));
    }

    #[test]
    fn test_decades_rounded_to_three_places() {
        let decades = vec![DecadeSummary {
            decade: 1990,
            gender: Gender::Female,
            avg_e0: 78.123456,
            years: 4,
        }];
        let mut buf = Vec::new();
        write_decades(&mut buf, &decades).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Decade,Gender,avg_e0,Years\n1990,Female,78.123,4\n");
    }

    #[test]
    fn test_decades_json() {
        let decades = vec![DecadeSummary {
            decade: 2000,
            gender: Gender::Male,
            avg_e0: 74.5,
            years: 10,
        }];
        let mut buf = Vec::new();
        write_decades_json(&mut buf, &decades).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["decade"], 2000);
        assert_eq!(value[0]["gender"], "Male");
        assert_eq!(value[0]["avg_e0"], 74.5);
    }
}
