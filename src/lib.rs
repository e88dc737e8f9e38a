//! Storm Report Library
//!
//! Builds the tables behind a reproducible report on the human and economic
//! impact of severe weather in the United States, from the NOAA Storm Events
//! database.
//!
//! This library provides tools for:
//! - Loading storm event CSV files with polars, restricted to an analysis window
//! - Resolving damage magnitude codes into absolute amounts
//! - Aggregating impact by event type and by state
//! - Ranking event types by harm (fatalities + injuries) and damage
//! - Summarizing the top-ranked event types by state for map shading
//! - Writing the report tables as CSV or Parquet

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod damage;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod rank;
pub mod regions;
pub mod summary;
pub mod tables;

// Re-export commonly used types
pub use config::ReportConfig;
pub use damage::resolve_scale;
pub use error::{Result, StormError};
pub use models::{CategoryTotals, EventRecord, Metric, NormalizedRecord, Region};
pub use pipeline::{ImpactReport, ReportPipeline};
pub use regions::RegionTable;
