//! Record loading from NOAA storm event CSV files
//!
//! Reads the input with polars, treating every column as text, then walks
//! the frame row by row yielding [`EventRecord`]s inside the analysis
//! window. Row-level problems never fail the load; they are tallied in
//! [`LoadStats`]. Only an unreadable file or a missing required column is
//! an error.

pub mod fields;

#[cfg(test)]
pub mod tests;

use crate::config::{AnalysisWindow, ColumnNames, ReportConfig, WindowPosition};
use crate::error::{Result, StormError};
use crate::models::{EventRecord, LoadStats};
use crate::regions::RegionTable;
use fields::{normalize_category, parse_amount, parse_count, parse_event_time, scale_code};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Records that passed the window filter, with the audit of what did not
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: Vec<EventRecord>,
    pub stats: LoadStats,
}

/// Loader for a single storm event CSV file
#[derive(Debug, Clone)]
pub struct RecordLoader {
    path: PathBuf,
    columns: ColumnNames,
    window: AnalysisWindow,
}

impl RecordLoader {
    pub fn new(path: impl Into<PathBuf>, config: &ReportConfig) -> Self {
        Self {
            path: path.into(),
            columns: config.columns.clone(),
            window: config.window,
        }
    }

    /// Parse the CSV into a frame of text columns
    pub fn read_frame(&self) -> Result<DataFrame> {
        if !self.path.exists() {
            return Err(StormError::DatasetNotFound {
                path: self.path.clone(),
            });
        }

        debug!("Reading storm events from {}", self.path.display());

        // Schema inference over zero rows reads every column as String
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .and_then(|reader| reader.finish())
            .map_err(|e| StormError::InvalidFormat {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "Read {} rows x {} columns from {}",
            frame.height(),
            frame.width(),
            self.path.display()
        );
        Ok(frame)
    }

    /// Lazily convert a frame into event records
    pub fn records<'a>(
        &self,
        frame: &'a DataFrame,
        regions: &'a RegionTable,
    ) -> Result<EventRecords<'a>> {
        let columns = FrameColumns::resolve(frame, &self.columns, &self.path)?;
        Ok(EventRecords {
            columns,
            window: self.window,
            regions,
            row: 0,
            len: frame.height(),
            stats: LoadStats::default(),
        })
    }

    /// Read the file and collect every record inside the window
    pub fn load(&self, regions: &RegionTable) -> Result<LoadedRecords> {
        let frame = self.read_frame()?;
        let mut iter = self.records(&frame, regions)?;
        let records: Vec<EventRecord> = iter.by_ref().collect();
        let stats = iter.into_stats();

        info!(
            "Loaded {} of {} rows ({} excluded, {} without a mapped state)",
            stats.loaded,
            stats.rows_read,
            stats.excluded(),
            stats.unmapped_state
        );
        if stats.coerced_numeric > 0 {
            warn!(
                "{} numeric fields were negative or unparseable and counted as zero",
                stats.coerced_numeric
            );
        }
        if stats.unmapped_state > 0 {
            warn!(
                "{} loaded events have a state code outside the region table",
                stats.unmapped_state
            );
        }

        Ok(LoadedRecords { records, stats })
    }
}

/// Borrowed text columns of the input frame
struct FrameColumns<'a> {
    begin_date: &'a StringChunked,
    end_date: Option<&'a StringChunked>,
    state: &'a StringChunked,
    event_type: &'a StringChunked,
    fatalities: &'a StringChunked,
    injuries: &'a StringChunked,
    property_damage: &'a StringChunked,
    property_scale: &'a StringChunked,
    crop_damage: &'a StringChunked,
    crop_scale: &'a StringChunked,
}

impl<'a> FrameColumns<'a> {
    fn resolve(frame: &'a DataFrame, names: &ColumnNames, path: &Path) -> Result<Self> {
        let required = |name: &str| -> Result<&'a StringChunked> {
            let column = frame
                .column(name)
                .map_err(|_| StormError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })?;
            column.str().map_err(|e| StormError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("column '{}' is not text: {}", name, e),
            })
        };

        let end_date = match frame.column(&names.end_date) {
            Ok(column) => column.str().ok(),
            Err(_) => {
                debug!(
                    "No '{}' column in {}; end times left empty",
                    names.end_date,
                    path.display()
                );
                None
            }
        };

        Ok(Self {
            begin_date: required(&names.begin_date)?,
            end_date,
            state: required(&names.state)?,
            event_type: required(&names.event_type)?,
            fatalities: required(&names.fatalities)?,
            injuries: required(&names.injuries)?,
            property_damage: required(&names.property_damage)?,
            property_scale: required(&names.property_scale)?,
            crop_damage: required(&names.crop_damage)?,
            crop_scale: required(&names.crop_scale)?,
        })
    }
}

/// Lazy sequence of event records over a parsed frame
pub struct EventRecords<'a> {
    columns: FrameColumns<'a>,
    window: AnalysisWindow,
    regions: &'a RegionTable,
    row: usize,
    len: usize,
    stats: LoadStats,
}

impl EventRecords<'_> {
    /// Audit counts for the rows consumed so far
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn into_stats(self) -> LoadStats {
        self.stats
    }

    fn parse_row(&mut self, row: usize) -> Option<EventRecord> {
        let cols = &self.columns;
        self.stats.rows_read += 1;

        let Some(begin_time) = parse_event_time(cols.begin_date.get(row)) else {
            debug!("Row {}: unparseable begin date {:?}", row, cols.begin_date.get(row));
            self.stats.unparseable_date += 1;
            return None;
        };

        match self.window.position(begin_time.date()) {
            WindowPosition::Before => {
                self.stats.before_window += 1;
                return None;
            }
            WindowPosition::After => {
                self.stats.after_window += 1;
                return None;
            }
            WindowPosition::Inside => {}
        }

        let Some(category) = normalize_category(cols.event_type.get(row)) else {
            self.stats.missing_category += 1;
            return None;
        };

        let fatalities = parse_count(cols.fatalities.get(row));
        let injuries = parse_count(cols.injuries.get(row));
        let property_raw = parse_amount(cols.property_damage.get(row));
        let crop_raw = parse_amount(cols.crop_damage.get(row));
        self.stats.coerced_numeric += [
            fatalities.is_invalid(),
            injuries.is_invalid(),
            property_raw.is_invalid(),
            crop_raw.is_invalid(),
        ]
        .iter()
        .filter(|invalid| **invalid)
        .count();

        let state_code = cols.state.get(row).unwrap_or_default().trim().to_string();
        let region = self.regions.lookup(&state_code);
        if region.is_none() {
            self.stats.unmapped_state += 1;
        }

        let end_time = cols
            .end_date
            .and_then(|end_date| parse_event_time(end_date.get(row)));

        self.stats.loaded += 1;
        Some(EventRecord {
            begin_time,
            end_time,
            state_code,
            region,
            category,
            fatalities: fatalities.or_zero(),
            injuries: injuries.or_zero(),
            property_raw: property_raw.or_zero(),
            property_scale_code: scale_code(cols.property_scale.get(row)),
            crop_raw: crop_raw.or_zero(),
            crop_scale_code: scale_code(cols.crop_scale.get(row)),
        })
    }
}

impl Iterator for EventRecords<'_> {
    type Item = EventRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.row < self.len {
            let row = self.row;
            self.row += 1;
            if let Some(record) = self.parse_row(row) {
                return Some(record);
            }
        }
        None
    }
}
