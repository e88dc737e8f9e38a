//! Configuration management and validation.
//!
//! Provides the analysis window, ranking depth, input column mapping and
//! output settings for a report run. Defaults reproduce the published
//! report; the CLI overrides individual fields.

use crate::constants::{self, columns};
use crate::error::{Result, StormError};
use chrono::NaiveDate;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Date range of events included in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    /// First begin date included (inclusive)
    pub start: NaiveDate,
    /// Last begin date included (inclusive). `None` keeps everything after `start`.
    pub end: Option<NaiveDate>,
}

impl Default for AnalysisWindow {
    fn default() -> Self {
        let (year, month, day) = constants::DEFAULT_WINDOW_START;
        Self {
            start: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
            end: None,
        }
    }
}

/// Where a begin date falls relative to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    Before,
    Inside,
    After,
}

impl AnalysisWindow {
    pub fn position(&self, date: NaiveDate) -> WindowPosition {
        if date < self.start {
            WindowPosition::Before
        } else if self.end.is_some_and(|end| date > end) {
            WindowPosition::After
        } else {
            WindowPosition::Inside
        }
    }
}

/// Input column headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub begin_date: String,
    /// Optional in the input; missing column means no end times
    pub end_date: String,
    pub state: String,
    pub event_type: String,
    pub fatalities: String,
    pub injuries: String,
    pub property_damage: String,
    pub property_scale: String,
    pub crop_damage: String,
    pub crop_scale: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            begin_date: columns::BEGIN_DATE.to_string(),
            end_date: columns::END_DATE.to_string(),
            state: columns::STATE.to_string(),
            event_type: columns::EVENT_TYPE.to_string(),
            fatalities: columns::FATALITIES.to_string(),
            injuries: columns::INJURIES.to_string(),
            property_damage: columns::PROPERTY_DAMAGE.to_string(),
            property_scale: columns::PROPERTY_SCALE.to_string(),
            crop_damage: columns::CROP_DAMAGE.to_string(),
            crop_scale: columns::CROP_SCALE.to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns the loader cannot work without
    pub fn required(&self) -> [&str; 9] {
        [
            self.begin_date.as_str(),
            self.state.as_str(),
            self.event_type.as_str(),
            self.fatalities.as_str(),
            self.injuries.as_str(),
            self.property_damage.as_str(),
            self.property_scale.as_str(),
            self.crop_damage.as_str(),
            self.crop_scale.as_str(),
        ]
    }
}

/// File format for written report tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = StormError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(StormError::Configuration {
                message: format!("Unknown output format '{}' (expected csv or parquet)", other),
            }),
        }
    }
}

/// Supported compression algorithms for parquet tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = StormError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(StormError::Configuration {
                message: format!(
                    "Unknown compression '{}' (expected snappy, zstd, lz4 or none)",
                    other
                ),
            }),
        }
    }
}

/// Output table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Only used for parquet output
    pub compression: CompressionAlgorithm,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            compression: CompressionAlgorithm::Snappy,
        }
    }
}

/// Global configuration for a report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub window: AnalysisWindow,

    /// Categories kept by each ranking
    pub top_n: usize,

    pub columns: ColumnNames,

    pub output: OutputConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window: AnalysisWindow::default(),
            top_n: constants::DEFAULT_TOP_N,
            columns: ColumnNames::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Set the first included begin date
    pub fn with_window_start(mut self, start: NaiveDate) -> Self {
        self.window.start = start;
        self
    }

    /// Set the last included begin date
    pub fn with_window_end(mut self, end: NaiveDate) -> Self {
        self.window.end = Some(end);
        self
    }

    /// Set the ranking depth
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Use custom input column headers
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    /// Configure table output
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Reject settings that cannot produce a report
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(StormError::Configuration {
                message: "top_n must be at least 1".to_string(),
            });
        }

        if let Some(end) = self.window.end {
            if end < self.window.start {
                return Err(StormError::Configuration {
                    message: format!(
                        "Analysis window ends ({}) before it starts ({})",
                        end, self.window.start
                    ),
                });
            }
        }

        if let Some(blank) = self.columns.required().iter().find(|c| c.trim().is_empty()) {
            return Err(StormError::Configuration {
                message: format!("Column name must not be blank: '{}'", blank),
            });
        }

        debug!(
            "Configuration valid: window {} to {:?}, top {}",
            self.window.start, self.window.end, self.top_n
        );
        Ok(())
    }
}
