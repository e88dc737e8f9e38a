//! Report pipeline.
//!
//! Orchestrates the complete run: load records inside the analysis window,
//! normalize damage, aggregate by category, rank by harm and damage, and
//! summarize the ranked categories by region. Each stage consumes the full
//! output of the previous one.

use crate::aggregate::aggregate_by_category;
use crate::config::ReportConfig;
use crate::damage::normalize_all;
use crate::error::{Result, StormError};
use crate::loader::{LoadedRecords, RecordLoader};
use crate::models::{
    CategoryTotals, ComparisonRow, EventRecord, LoadStats, Metric, NormalizedRecord,
    RankedCategory, RegionImpact,
};
use crate::rank::{comparison_table, top_n};
use crate::regions::RegionTable;
use crate::summary::summarize_regions;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info};

/// Every table the report is rendered from
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactReport {
    pub load_stats: LoadStats,
    /// All categories, ordered by label
    pub category_totals: Vec<CategoryTotals>,
    pub harm_top: Vec<RankedCategory>,
    pub damage_top: Vec<RankedCategory>,
    pub harm_by_region: Vec<RegionImpact>,
    pub damage_by_region: Vec<RegionImpact>,
    pub comparison: Vec<ComparisonRow>,
    pub processing_time_ms: u128,
}

impl ImpactReport {
    /// Build the report tables from records already restricted to the window
    pub fn build(records: Vec<EventRecord>, load_stats: LoadStats, top: usize) -> Self {
        let start_time = Instant::now();

        let normalized: Vec<NormalizedRecord> = normalize_all(records).collect();
        let category_totals = aggregate_by_category(&normalized);

        let harm_top = top_n(&category_totals, Metric::Harm, top);
        let damage_top = top_n(&category_totals, Metric::Damage, top);

        let harm_by_region = summarize_regions(&normalized, &harm_top, Metric::Harm);
        let damage_by_region = summarize_regions(&normalized, &damage_top, Metric::Damage);

        let comparison = comparison_table(&category_totals);

        debug!(
            "Built report from {} records: {} categories, {}/{} regions",
            normalized.len(),
            category_totals.len(),
            harm_by_region.len(),
            damage_by_region.len()
        );

        Self {
            load_stats,
            category_totals,
            harm_top,
            damage_top,
            harm_by_region,
            damage_by_region,
            comparison,
            processing_time_ms: start_time.elapsed().as_millis(),
        }
    }

    /// Sum of damage over all categories, in absolute currency units
    pub fn total_damage(&self) -> f64 {
        self.category_totals.iter().map(|t| t.damage()).sum()
    }

    /// Sum of harm over all categories
    pub fn total_harm(&self) -> u64 {
        self.category_totals.iter().map(|t| t.harm()).sum()
    }
}

/// Runs the report for one input file
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    input_path: PathBuf,
    config: ReportConfig,
    regions: RegionTable,
}

impl ReportPipeline {
    /// Create a pipeline for an input file with default configuration
    pub fn new(input_path: PathBuf) -> Result<Self> {
        if !input_path.exists() {
            return Err(StormError::DatasetNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            config: ReportConfig::default(),
            regions: RegionTable::us_states(),
        })
    }

    /// Configure the pipeline
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom region table
    pub fn with_regions(mut self, regions: RegionTable) -> Self {
        self.regions = regions;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ImpactReport> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!(
            "Building storm impact report from {} (events from {})",
            self.input_path.display(),
            self.config.window.start
        );

        let LoadedRecords { records, stats } = self.load_records().await?;

        let mut report = ImpactReport::build(records, stats, self.config.top_n);
        report.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Report built in {}ms: {} categories, top {} by harm and damage",
            report.processing_time_ms,
            report.category_totals.len(),
            self.config.top_n
        );
        Ok(report)
    }

    /// Parse the input on the blocking pool
    async fn load_records(&self) -> Result<LoadedRecords> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Loading {}", self.input_path.display()));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let loader = RecordLoader::new(self.input_path.clone(), &self.config);
        let regions = self.regions.clone();
        let loaded = task::spawn_blocking(move || loader.load(&regions))
            .await
            .map_err(|e| StormError::ProcessingFailed {
                path: self.input_path.clone(),
                reason: format!("Loader task failed: {}", e),
            })?;

        match &loaded {
            Ok(loaded) => spinner.finish_with_message(format!(
                "Loaded {} events ({} rows read)",
                loaded.stats.loaded, loaded.stats.rows_read
            )),
            Err(_) => spinner.finish_and_clear(),
        }

        loaded
    }
}
