//! Command-line interface components.

use crate::config::{CompressionAlgorithm, OutputConfig, OutputFormat, ReportConfig};
use crate::constants;
use crate::error::Result;
use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "storm_report")]
#[command(about = "Rank NOAA storm event types by human and economic impact")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the storm events CSV (optional - will look in the user data directory if not provided)
    #[arg(value_name = "INPUT_PATH")]
    pub input_path: Option<PathBuf>,

    /// Output directory for report tables
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// First event begin date included in the analysis (YYYY-MM-DD)
    #[arg(long, default_value = "2007-01-01")]
    pub since: NaiveDate,

    /// Last event begin date included in the analysis (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Number of event types kept in each ranking
    #[arg(short = 'n', long, default_value_t = constants::DEFAULT_TOP_N)]
    pub top: usize,

    /// Table format (csv, parquet)
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Print the summary without writing tables
    #[arg(long)]
    pub summary_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Get the output path, defaulting to a `storm-report` directory next to the input
    pub fn get_output_path(&self, input_path: &Path) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => input_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(constants::DEFAULT_OUTPUT_DIR),
        }
    }

    /// Build the report configuration from the arguments
    pub fn to_config(&self) -> Result<ReportConfig> {
        let output = OutputConfig {
            format: self.format.parse::<OutputFormat>()?,
            compression: self.compression.parse::<CompressionAlgorithm>()?,
        };

        let mut config = ReportConfig::default()
            .with_window_start(self.since)
            .with_top_n(self.top)
            .with_output(output);
        if let Some(until) = self.until {
            config = config.with_window_end(until);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Set up structured logging
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("storm_report={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    tracing::debug!("Logging initialized at level: {}", log_level);
}

/// Input discovery in the user data directory
pub mod input_discovery {
    use super::*;
    use anyhow::{Context, Result};

    /// Directory searched when no input path is given
    pub fn find_data_directory() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().context("Could not determine user data directory")?;
        Ok(data_dir.join("storm-report"))
    }

    /// Locate the default storm events CSV
    pub fn find_default_input() -> Result<PathBuf> {
        let input = find_data_directory()?.join(constants::DEFAULT_INPUT_FILE);

        if !input.exists() {
            anyhow::bail!(
                "No input given and {} does not exist. Download the NOAA storm data CSV there or pass its path.",
                input.display()
            );
        }

        Ok(input)
    }
}

/// Console rendering of a finished report
pub mod summary {
    use crate::constants::is_canonical_event_type;
    use crate::models::{RankedCategory, RegionImpact};
    use crate::pipeline::ImpactReport;
    use colored::*;

    fn print_ranking(title: &str, ranked: &[RankedCategory], unit: &str) {
        println!("\n{}", title.bright_green().bold());
        for entry in ranked {
            let marker = if is_canonical_event_type(&entry.category) {
                " "
            } else {
                "*"
            };
            println!(
                "  {:>3}. {}{:<32} {}",
                entry.rank.to_string().bright_yellow(),
                marker.bright_black(),
                entry.category.bright_cyan(),
                format!("{:.2} {}", entry.value, unit).bright_white()
            );
        }
    }

    fn print_regions(title: &str, regions: &[RegionImpact], unit: &str, limit: usize) {
        println!("\n{}", title.bright_green().bold());
        for impact in regions.iter().take(limit) {
            println!(
                "  {:<24} {} {}",
                impact.region.name().bright_cyan(),
                format!("{:.2} {}", impact.value, unit).bright_white(),
                format!("({} events)", impact.count).bright_black()
            );
        }
        if regions.len() > limit {
            println!(
                "  {}",
                format!("... {} more regions", regions.len() - limit).bright_black()
            );
        }
    }

    /// Print rankings, leading regions and the load audit
    pub fn print_report(report: &ImpactReport) {
        let stats = &report.load_stats;

        println!("\n{}", "Storm Impact Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Rows read:".bright_cyan(),
            stats.rows_read.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Events analysed:".bright_cyan(),
            stats.loaded.to_string().bright_white().bold()
        );
        println!(
            "  {} {} before window, {} after window, {} bad dates, {} blank types",
            "Excluded:".bright_cyan(),
            stats.before_window,
            stats.after_window,
            stats.unparseable_date,
            stats.missing_category
        );
        if stats.unmapped_state > 0 {
            println!(
                "  {} {} events without a known state (kept in category totals)",
                "Unmapped:".bright_yellow(),
                stats.unmapped_state
            );
        }
        if stats.coerced_numeric > 0 {
            println!(
                "  {} {} unusable numeric fields read as zero",
                "Coerced:".bright_yellow(),
                stats.coerced_numeric
            );
        }
        println!(
            "  {} {}",
            "Event types:".bright_cyan(),
            report.category_totals.len().to_string().bright_white()
        );

        print_ranking("Most harmful event types", &report.harm_top, "people");
        print_ranking(
            "Most costly event types",
            &report.damage_top,
            "billion USD",
        );
        print_regions("Harm by state", &report.harm_by_region, "people", 10);
        print_regions(
            "Damage by state",
            &report.damage_by_region,
            "billion USD",
            10,
        );

        println!(
            "\n  {}",
            "* event type outside the 48 canonical NWS categories".bright_black()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["storm_report", "/data/StormData.csv"]);
        assert_eq!(args.top, 10);
        assert_eq!(args.since, NaiveDate::from_ymd_opt(2007, 1, 1).unwrap());
        assert_eq!(args.get_log_level(), "info");

        let config = args.to_config().unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(
            args.get_output_path(Path::new("/data/StormData.csv")),
            PathBuf::from("/data/storm-report")
        );
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "storm_report",
            "in.csv",
            "--since",
            "2000-01-01",
            "--until",
            "2011-11-30",
            "-n",
            "5",
            "--format",
            "parquet",
            "--compression",
            "zstd",
            "-o",
            "/tmp/out",
            "-v",
        ]);

        let config = args.to_config().unwrap();
        assert_eq!(
            config.window.start,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
        assert_eq!(
            config.window.end,
            NaiveDate::from_ymd_opt(2011, 11, 30)
        );
        assert_eq!(config.top_n, 5);
        assert_eq!(config.output.format, OutputFormat::Parquet);
        assert_eq!(config.output.compression, CompressionAlgorithm::Zstd);
        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(
            args.get_output_path(Path::new("in.csv")),
            PathBuf::from("/tmp/out")
        );
    }

    #[test]
    fn test_invalid_args_rejected() {
        let args = Args::parse_from(["storm_report", "-n", "0"]);
        assert!(args.to_config().is_err());

        let args = Args::parse_from(["storm_report", "--format", "xlsx"]);
        assert!(args.to_config().is_err());

        assert!(Args::try_parse_from(["storm_report", "--since", "yesterday"]).is_err());
        assert!(Args::try_parse_from(["storm_report", "-v", "-q"]).is_err());
    }
}
