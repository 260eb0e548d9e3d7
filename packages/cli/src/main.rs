#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line shell for the disease choropleth pipeline.
//!
//! Reads a wide case table (CSV) and a region boundary file (`GeoJSON`),
//! runs one query, and prints the result as JSON on stdout. Logging goes
//! to stderr via `pretty_env_logger` (`RUST_LOG=info` to see the region
//! reconciliation summary).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use disease_map_cases::CaseTable;
use disease_map_cases::breakdown::disease_breakdown;
use disease_map_cases::share::disease_share;
use disease_map_cases::normalize::load_case_table;
use disease_map_cases_models::Disease;
use disease_map_choropleth::ChoroplethError;
use disease_map_choropleth::batch::{DEFAULT_COMPARISON_YEARS, select_comparison_years};
use disease_map_choropleth::config::MapConfig;
use disease_map_choropleth::pipeline::{compare_years, render_map};
use disease_map_choropleth::scales::{all_scales, find_scale};
use disease_map_choropleth_models::{
    ColorScale, ComparisonQuery, MapQuery, RenderPayload, ValueMode, YearRange,
};
use disease_map_geography::load::load_regions;
use disease_map_geography_models::RegionGeometry;

#[derive(Parser)]
#[command(name = "disease_map", about = "Disease choropleth payload builder")]
struct Cli {
    /// Config file overriding column names and the default color scale
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one map for a year and disease
    Render {
        #[command(flatten)]
        inputs: Inputs,
        /// Year to map
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        style: Style,
    },
    /// Render one map per year for side-by-side comparison
    Compare {
        #[command(flatten)]
        inputs: Inputs,
        /// Explicit years, comma separated (defaults to 2008-2011)
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["start", "end"])]
        years: Vec<i32>,
        /// First year of an evenly sampled range
        #[arg(long, requires = "end")]
        start: Option<i32>,
        /// Last year of an evenly sampled range
        #[arg(long, requires = "start")]
        end: Option<i32>,
        /// Number of years to sample from the range
        #[arg(long, default_value_t = 4)]
        count: usize,
        #[command(flatten)]
        style: Style,
    },
    /// List the years and diseases in a case table
    Catalog {
        /// Wide case table (CSV)
        #[arg(long)]
        cases: PathBuf,
        /// Also print every region's per-disease counts for this year
        #[arg(long)]
        year: Option<i32>,
        /// Also print each region's share of `--year`'s total for this disease
        #[arg(long, requires = "year")]
        disease: Option<String>,
    },
    /// List the color scale presets
    Scales,
}

#[derive(Args)]
struct Inputs {
    /// Wide case table (CSV)
    #[arg(long)]
    cases: PathBuf,
    /// Region boundaries (`GeoJSON` `FeatureCollection`)
    #[arg(long)]
    boundaries: PathBuf,
}

#[derive(Args)]
struct Style {
    /// Disease column token, e.g. `Lymphoedema`
    #[arg(long)]
    disease: String,
    /// `absolute` or `percent`
    #[arg(long, default_value_t = ValueMode::Absolute)]
    mode: ValueMode,
    /// Color scale preset (defaults to the configured scale)
    #[arg(long)]
    scale: Option<String>,
    /// Print `GeoJSON` feature collections instead of render payloads
    #[arg(long)]
    geojson: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };

    match cli.command {
        Commands::Render {
            inputs,
            year,
            style,
        } => {
            let (table, regions) = load_inputs(&inputs, &config)?;
            let query = MapQuery {
                year,
                disease: Disease::from(style.disease.as_str()),
                mode: style.mode,
            };
            let scale = resolve_scale(&style, &config)?;
            let payload = render_map(&table, &regions, &query, &scale)?;
            print_payloads(&[payload], style.geojson)?;
        }
        Commands::Compare {
            inputs,
            years,
            start,
            end,
            count,
            style,
        } => {
            let years = match (start, end) {
                (Some(start), Some(end)) => {
                    select_comparison_years(YearRange { start, end }, count)?
                }
                _ if years.is_empty() => DEFAULT_COMPARISON_YEARS.to_vec(),
                _ => years,
            };
            let (table, regions) = load_inputs(&inputs, &config)?;
            let query = ComparisonQuery {
                years,
                disease: Disease::from(style.disease.as_str()),
                mode: style.mode,
            };
            let scale = resolve_scale(&style, &config)?;
            let payloads = compare_years(&table, &regions, &query, &scale)?;
            print_payloads(&payloads, style.geojson)?;
        }
        Commands::Catalog {
            cases,
            year,
            disease,
        } => {
            let table = load_case_table(&cases, &config.table)?;
            let disease = disease.as_deref().map(Disease::from);
            let catalog = build_catalog(&table, year, disease.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Commands::Scales => {
            println!("{}", serde_json::to_string_pretty(&all_scales())?);
        }
    }

    Ok(())
}

fn load_inputs(
    inputs: &Inputs,
    config: &MapConfig,
) -> Result<(CaseTable, Vec<RegionGeometry>), ChoroplethError> {
    let table = load_case_table(&inputs.cases, &config.table)?;
    let regions = load_regions(&inputs.boundaries, &config.geometry)?;
    log::info!(
        "Loaded {} case records from {} and {} regions from {}",
        table.len(),
        inputs.cases.display(),
        regions.len(),
        inputs.boundaries.display()
    );
    Ok((table, regions))
}

fn resolve_scale(style: &Style, config: &MapConfig) -> Result<ColorScale, ChoroplethError> {
    style
        .scale
        .as_deref()
        .map_or_else(|| config.color_scale(), find_scale)
}

fn print_payloads(payloads: &[RenderPayload], geojson: bool) -> Result<(), serde_json::Error> {
    for payload in payloads {
        let text = if geojson {
            serde_json::to_string_pretty(&payload.to_feature_collection())?
        } else {
            serde_json::to_string_pretty(payload)?
        };
        println!("{text}");
    }
    Ok(())
}

fn build_catalog(
    table: &CaseTable,
    year: Option<i32>,
    disease: Option<&Disease>,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let diseases: Vec<_> = table
        .diseases()
        .into_iter()
        .map(|disease| {
            serde_json::json!({
                "name": disease.as_str(),
                "description": disease.description(),
            })
        })
        .collect();

    let mut catalog = serde_json::json!({
        "years": table.years(),
        "yearBounds": table.year_bounds(),
        "diseases": diseases,
        "regions": table.region_keys(),
    });
    if let Some(year) = year {
        catalog["breakdown"] = serde_json::to_value(disease_breakdown(table.records(), year)?)?;
        if let Some(disease) = disease {
            catalog["shares"] =
                serde_json::to_value(disease_share(table.records(), year, disease)?)?;
        }
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;
    use disease_map_cases::normalize::parse_case_table;
    use disease_map_cases_models::TableLayout;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_value_mode() {
        let cli = Cli::try_parse_from([
            "disease_map",
            "render",
            "--cases",
            "cases.csv",
            "--boundaries",
            "india.geojson",
            "--year",
            "2008",
            "--disease",
            "Hydrocele",
            "--mode",
            "percent",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { year, style, .. } => {
                assert_eq!(year, 2008);
                assert_eq!(style.mode, ValueMode::Percent);
                assert_eq!(style.disease, "Hydrocele");
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn value_mode_defaults_to_absolute() {
        let cli = Cli::try_parse_from([
            "disease_map",
            "compare",
            "--cases",
            "cases.csv",
            "--boundaries",
            "india.geojson",
            "--disease",
            "Hydrocele",
        ])
        .unwrap();
        match cli.command {
            Commands::Compare { style, years, .. } => {
                assert_eq!(style.mode, ValueMode::Absolute);
                assert!(years.is_empty());
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn rejects_unknown_value_mode() {
        assert!(
            Cli::try_parse_from([
                "disease_map",
                "render",
                "--cases",
                "cases.csv",
                "--boundaries",
                "india.geojson",
                "--year",
                "2008",
                "--disease",
                "Hydrocele",
                "--mode",
                "ratio",
            ])
            .is_err()
        );
    }

    #[test]
    fn catalog_disease_requires_year() {
        assert!(
            Cli::try_parse_from([
                "disease_map",
                "catalog",
                "--cases",
                "cases.csv",
                "--disease",
                "Hydrocele",
            ])
            .is_err()
        );
    }

    #[test]
    fn catalog_shares_include_regions_without_geometry() {
        let csv = "\
States/UTs,Short Form,2008-Lymphoedema,2008-Hydrocele
Goa,GA,191,100
Kerala,KL,10886,300
Bihar,BR,212536,
";
        let table = parse_case_table(csv.as_bytes(), &TableLayout::default()).unwrap();
        let catalog = build_catalog(&table, Some(2008), Some(&Disease::Hydrocele)).unwrap();

        assert_eq!(catalog["years"], serde_json::json!([2008]));
        let shares = catalog["shares"].as_array().unwrap();
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0]["regionName"], "Goa");
        assert_eq!(shares[0]["percent"], 25.0);
        assert_eq!(shares[2]["regionName"], "Bihar");
        assert_eq!(shares[2]["reported"], false);
        assert_eq!(catalog["breakdown"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn catalog_without_year_has_no_breakdown() {
        let csv = "States/UTs,2008-Hydrocele\nGoa,1\n";
        let table = parse_case_table(csv.as_bytes(), &TableLayout::default()).unwrap();
        let catalog = build_catalog(&table, None, None).unwrap();
        assert!(catalog.get("breakdown").is_none());
        assert!(catalog.get("shares").is_none());
    }
}
