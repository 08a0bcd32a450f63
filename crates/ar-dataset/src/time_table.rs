//! CSV time-index table loader.
//!
//! # CSV format
//!
//! One row per time index, indices contiguous from 0 (rows may appear in
//! any order):
//!
//! ```csv
//! index,unix_secs
//! 0,1689858000
//! 1,1689859800
//! 2,1689861600
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ar_core::TimeIndexTable;

use crate::DatasetError;

#[derive(Deserialize)]
struct TimeRecord {
    index:     u32,
    unix_secs: f64,
}

/// Load the time-index table from a CSV file.
pub fn load_time_table_csv(path: &Path) -> Result<TimeIndexTable, DatasetError> {
    let file = std::fs::File::open(path)
        .map_err(DatasetError::Io)?;
    load_time_table_reader(file)
}

/// Like [`load_time_table_csv`] but accepts any `Read` source.
pub fn load_time_table_reader<R: Read>(reader: R) -> Result<TimeIndexTable, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut rows: Vec<TimeRecord> = csv_reader
        .deserialize::<TimeRecord>()
        .collect::<Result<_, csv::Error>>()?;
    rows.sort_by_key(|r| r.index);

    for (expected, row) in rows.iter().enumerate() {
        if row.index as usize != expected {
            return Err(DatasetError::Parse(format!(
                "time table index {} found where {expected} was expected (indices must be contiguous from 0)",
                row.index
            )));
        }
    }

    Ok(TimeIndexTable::new(rows.into_iter().map(|r| r.unix_secs).collect()))
}
