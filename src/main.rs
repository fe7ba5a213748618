//! Life Tables CLI
//!
//! Builds life tables for every (year, gender) in a cleaned mortality CSV and
//! writes the summary tables, or prints a single cohort's table.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use life_tables::{
    export, input, Gender, LifeTableConfig, LifeTablePipeline, PipelineConfig, PipelineOutput,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "life-tables")]
#[command(about = "Period life tables and life expectancy summaries from mortality counts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build every cohort and write all output tables
    Build {
        #[command(flatten)]
        common: CommonArgs,

        /// Directory to write CSV outputs into
        #[arg(short, long, default_value = "output")]
        outdir: PathBuf,

        /// Also write e0_by_decade.json
        #[arg(long)]
        json: bool,
    },
    /// Print one cohort's life table as CSV
    Table {
        #[command(flatten)]
        common: CommonArgs,

        /// Year of the table (default: latest year in the data)
        #[arg(short, long)]
        year: Option<i32>,

        /// Gender of the table
        #[arg(short, long, default_value = "Male")]
        gender: String,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Cleaned CSV with columns Year, Age, Gender, Population, Deaths
    #[arg(short, long, default_value = input::DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Starting cohort size l0
    #[arg(long, default_value_t = life_tables::life_table::DEFAULT_RADIX)]
    radix: f64,

    /// Width of the age bands for mx trends
    #[arg(long, default_value_t = life_tables::summary::DEFAULT_BAND_WIDTH)]
    band_width: u32,
}

impl CommonArgs {
    fn run(&self) -> Result<PipelineOutput> {
        let start = Instant::now();
        let observations = input::load_observations(&self.input)
            .with_context(|| format!("failed to load {}", self.input.display()))?;
        log::info!("loaded {} observations in {:?}", observations.len(), start.elapsed());

        let config = PipelineConfig {
            life_table: LifeTableConfig::default().with_radix(self.radix),
            age_band_width: self.band_width,
        };
        let pipeline = LifeTablePipeline::new(config)?;
        let output = pipeline.run(observations);

        for (key, err) in &output.failures {
            eprintln!("cohort {} skipped: {}", key, err);
        }
        Ok(output)
    }
}

/// Summary printed after a build: the header line, then every file written
fn build_report(output: &PipelineOutput, written: &[PathBuf]) -> String {
    let mut report = format!(
        "Built {} life tables ({} cohorts skipped)\n",
        output.tables.len(),
        output.failures.len()
    );
    for path in written {
        report.push_str(&format!("  {}\n", path.display()));
    }
    report
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build { common, outdir, json } => {
            let output = common.run()?;
            let mut written = export::write_all(&outdir, &output)
                .with_context(|| format!("failed to write outputs to {}", outdir.display()))?;

            if json {
                let path = outdir.join("e0_by_decade.json");
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                export::write_decades_json(file, &output.decades)?;
                written.push(path);
            }

            print!("{}", build_report(&output, &written));
        }
        Command::Table { common, year, gender } => {
            let gender = Gender::parse_label(&gender)
                .with_context(|| format!("unknown gender {:?}", gender))?;
            let output = common.run()?;
            let year = match year.or_else(|| output.latest_year()) {
                Some(year) => year,
                None => bail!("no life tables were built"),
            };
            let table = output
                .table(year, gender)
                .with_context(|| format!("no life table for year {} and {}", year, gender))?;

            export::write_life_tables(std::io::stdout().lock(), [table])?;
            if let Some(e0) = table.e0() {
                eprintln!("e0 ({}, {}) = {:.3}", year, gender, e0);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_tables::RateObservation;

    #[test]
    fn test_build_report_lists_json_after_header() {
        let output = LifeTablePipeline::default().run(vec![RateObservation::new(
            2000,
            0,
            Gender::Male,
            Some(1000.0),
            Some(5.0),
        )]);
        let written = vec![
            PathBuf::from("out/life_tables.csv"),
            PathBuf::from("out/e0_by_decade.json"),
        ];

        let report = build_report(&output, &written);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Built 1 life tables (0 cohorts skipped)");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("e0_by_decade.json"));
    }
}
