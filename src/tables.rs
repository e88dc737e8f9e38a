//! Report table output
//!
//! Converts an [`ImpactReport`] into named polars frames, the tabular
//! contract consumed by chart and map rendering, and writes them as CSV or
//! Parquet files.

use crate::config::{OutputConfig, OutputFormat};
use crate::constants::tables;
use crate::error::{Result, StormError};
use crate::models::{Metric, RankedCategory, RegionImpact};
use crate::pipeline::ImpactReport;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn ranked_frame(ranked: &[RankedCategory], metric: Metric) -> PolarsResult<DataFrame> {
    let ranks: Vec<u32> = ranked.iter().map(|r| r.rank as u32).collect();
    let categories: Vec<&str> = ranked.iter().map(|r| r.category.as_str()).collect();
    let value_column = metric.label();

    // Harm is a whole count
    if metric == Metric::Harm {
        let values: Vec<u64> = ranked.iter().map(|r| r.value as u64).collect();
        df!("rank" => ranks, "category" => categories, value_column => values)
    } else {
        let values: Vec<f64> = ranked.iter().map(|r| r.value).collect();
        df!("rank" => ranks, "category" => categories, value_column => values)
    }
}

fn region_frame(impacts: &[RegionImpact], metric: Metric) -> PolarsResult<DataFrame> {
    let regions: Vec<&str> = impacts.iter().map(|r| r.region.name()).collect();
    let events: Vec<u64> = impacts.iter().map(|r| r.count).collect();
    let value_column = metric.label();

    if metric == Metric::Harm {
        let values: Vec<u64> = impacts.iter().map(|r| r.value as u64).collect();
        df!("region" => regions, "events" => events, value_column => values)
    } else {
        let values: Vec<f64> = impacts.iter().map(|r| r.value).collect();
        df!("region" => regions, "events" => events, value_column => values)
    }
}

fn comparison_frame(report: &ImpactReport) -> PolarsResult<DataFrame> {
    let rows = &report.comparison;
    df!(
        "rank" => rows.iter().map(|r| r.rank as u32).collect::<Vec<_>>(),
        "harm_category" => rows.iter().map(|r| r.harm_category.as_str()).collect::<Vec<_>>(),
        "harm" => rows.iter().map(|r| r.harm as u64).collect::<Vec<_>>(),
        "harm_canonical" => rows.iter().map(|r| r.harm_canonical).collect::<Vec<_>>(),
        "damage_category" => rows.iter().map(|r| r.damage_category.as_str()).collect::<Vec<_>>(),
        "damage_billions" => rows.iter().map(|r| r.damage_billions).collect::<Vec<_>>(),
        "damage_canonical" => rows.iter().map(|r| r.damage_canonical).collect::<Vec<_>>()
    )
}

fn totals_frame(report: &ImpactReport) -> PolarsResult<DataFrame> {
    let totals = &report.category_totals;
    df!(
        "category" => totals.iter().map(|t| t.category.as_str()).collect::<Vec<_>>(),
        "events" => totals.iter().map(|t| t.impact.count).collect::<Vec<_>>(),
        "fatalities" => totals.iter().map(|t| t.impact.fatalities).collect::<Vec<_>>(),
        "injuries" => totals.iter().map(|t| t.impact.injuries).collect::<Vec<_>>(),
        "property_damage" => totals.iter().map(|t| t.impact.property_damage).collect::<Vec<_>>(),
        "crop_damage" => totals.iter().map(|t| t.impact.crop_damage).collect::<Vec<_>>(),
        "harm" => totals.iter().map(|t| t.harm()).collect::<Vec<_>>(),
        "damage" => totals.iter().map(|t| t.damage()).collect::<Vec<_>>()
    )
}

/// All report tables as `(name, frame)` pairs, in rendering order
pub fn report_frames(report: &ImpactReport) -> Result<Vec<(&'static str, DataFrame)>> {
    Ok(vec![
        (tables::HARM_TOP, ranked_frame(&report.harm_top, Metric::Harm)?),
        (
            tables::DAMAGE_TOP,
            ranked_frame(&report.damage_top, Metric::Damage)?,
        ),
        (
            tables::HARM_BY_REGION,
            region_frame(&report.harm_by_region, Metric::Harm)?,
        ),
        (
            tables::DAMAGE_BY_REGION,
            region_frame(&report.damage_by_region, Metric::Damage)?,
        ),
        (tables::CATEGORY_COMPARISON, comparison_frame(report)?),
        (tables::CATEGORY_TOTALS, totals_frame(report)?),
    ])
}

/// Writes report tables into an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    output: OutputConfig,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf, output: OutputConfig) -> Self {
        Self { output_dir, output }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a table is written to
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", table, self.output.format.extension()))
    }

    /// Write every report table, returning the written paths
    pub async fn write_all(&self, report: &ImpactReport) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let frames = report_frames(report)?;
        let progress = ProgressBar::new(frames.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut written = Vec::with_capacity(frames.len());
        for (name, mut frame) in frames {
            progress.set_message(name);
            written.push(self.write_table(name, &mut frame)?);
            progress.inc(1);
        }
        progress.finish_with_message("Report tables written");

        info!(
            "Wrote {} tables to {}",
            written.len(),
            self.output_dir.display()
        );
        Ok(written)
    }

    fn write_table(&self, name: &str, frame: &mut DataFrame) -> Result<PathBuf> {
        let path = self.table_path(name);
        let write_failed = |reason: String| StormError::WriteFailed {
            table: name.to_string(),
            path: path.clone(),
            reason,
        };

        let mut file = File::create(&path).map_err(|e| write_failed(e.to_string()))?;

        match self.output.format {
            OutputFormat::Csv => CsvWriter::new(&mut file)
                .include_header(true)
                .finish(frame)
                .map_err(|e| write_failed(e.to_string()))?,
            OutputFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(self.output.compression.to_polars_compression())
                    .finish(frame)
                    .map_err(|e| write_failed(e.to_string()))?;
            }
        }

        debug!("Wrote {} rows to {}", frame.height(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompressionAlgorithm;
    use crate::models::{EventRecord, LoadStats};
    use crate::regions::RegionTable;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_report() -> ImpactReport {
        let regions = RegionTable::us_states();
        let begin_time = NaiveDate::from_ymd_opt(2009, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let event = |category: &str, state: &str, injuries: u64, property_raw: f64| EventRecord {
            begin_time,
            end_time: None,
            state_code: state.to_string(),
            region: regions.lookup(state),
            category: category.to_string(),
            fatalities: 0,
            injuries,
            property_raw,
            property_scale_code: "M".to_string(),
            crop_raw: 0.0,
            crop_scale_code: String::new(),
        };

        ImpactReport::build(
            vec![
                event("Tornado", "AL", 30, 500.0),
                event("Flood", "MS", 2, 1500.0),
                event("Lightning", "FL", 5, 1.0),
            ],
            LoadStats::default(),
            10,
        )
    }

    #[test]
    fn test_report_frames_shapes() {
        let frames = report_frames(&sample_report()).unwrap();
        let names: Vec<&str> = frames.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "harm_top",
                "damage_top",
                "harm_by_region",
                "damage_by_region",
                "category_comparison",
                "category_totals"
            ]
        );

        let (_, harm_top) = &frames[0];
        assert_eq!(harm_top.height(), 3);
        assert_eq!(harm_top.width(), 3);

        let (_, comparison) = &frames[4];
        assert_eq!(comparison.height(), 3);
        assert_eq!(comparison.width(), 7);

        let (_, totals) = &frames[5];
        assert_eq!(totals.width(), 8);
    }

    #[test]
    fn test_damage_top_values_in_billions() {
        let frames = report_frames(&sample_report()).unwrap();
        let (_, damage_top) = &frames[1];

        let categories = damage_top.column("category").unwrap().str().unwrap();
        assert_eq!(categories.get(0), Some("Flood"));

        let values = damage_top.column("damage_billions").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(1.5));
    }

    #[tokio::test]
    async fn test_write_csv_tables() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("report");
        let writer = ReportWriter::new(output_dir.clone(), OutputConfig::default());

        let written = writer.write_all(&sample_report()).await.unwrap();

        assert_eq!(written.len(), 6);
        assert!(written.iter().all(|path| path.exists()));

        let harm_csv = std::fs::read_to_string(output_dir.join("harm_top.csv")).unwrap();
        let mut lines = harm_csv.lines();
        assert_eq!(lines.next(), Some("rank,category,harm"));
        assert_eq!(lines.next(), Some("1,Tornado,30"));
    }

    #[tokio::test]
    async fn test_write_parquet_tables() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputConfig {
            format: OutputFormat::Parquet,
            compression: CompressionAlgorithm::Zstd,
        };
        let writer = ReportWriter::new(temp_dir.path().to_path_buf(), output);

        let written = writer.write_all(&sample_report()).await.unwrap();

        assert_eq!(written.len(), 6);
        let region_table = writer.table_path("damage_by_region");
        assert_eq!(region_table.extension().unwrap(), "parquet");
        assert!(std::fs::metadata(region_table).unwrap().len() > 0);
    }
}
