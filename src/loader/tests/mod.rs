//! Tests for the record loader
//!
//! Field policy tests run on plain strings; loader tests write small CSV
//! fixtures to temporary files and read them back through polars.


use std::io::Write;
use tempfile::NamedTempFile;

/// NOAA header row used by the fixtures
pub const HEADER: &str =
    "BGN_DATE,END_DATE,STATE,EVTYPE,FATALITIES,INJURIES,PROPDMG,PROPDMGEXP,CROPDMG,CROPDMGEXP";

/// Write a CSV fixture with the standard header and the given data rows
pub fn write_fixture(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}
