//! Atlas JSON loader.
//!
//! # JSON format
//!
//! A top-level array with one object per entity.  Only `id`, `name` and
//! `path` are read; every other field (`description`, `links`, `center`,
//! …) is ignored.
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "name": "Flag of France",
//!     "path": {
//!       "1-56":     [[0, 0], [0, 10], [10, 10], [10, 0]],
//!       "57-166, T": [[0, 0], [0, 20], [10, 20], [10, 0]]
//!     }
//!   }
//! ]
//! ```
//!
//! `id` may be a JSON integer or a numeric string.  The key order of `path`
//! is preserved (serde_json `preserve_order`), so boundaries come out in the
//! order they were written.
//!
//! Fetching the document over the network is the caller's concern; this
//! module starts from a file or any `Read` source.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ar_core::{EntityId, Vertex};

use crate::atlas::{AtlasEntry, Boundary, Dataset};
use crate::DatasetError;

// ── JSON record ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AtlasRecord {
    id:   RawId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(u64),
    Text(String),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the atlas from a JSON file on disk.
pub fn load_atlas_json(path: &Path) -> Result<Dataset, DatasetError> {
    let file = std::fs::File::open(path)
        .map_err(DatasetError::Io)?;
    load_atlas_reader(std::io::BufReader::new(file))
}

/// Like [`load_atlas_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for a document already
/// fetched into memory.
pub fn load_atlas_reader<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let records: Vec<AtlasRecord> = serde_json::from_reader(reader)?;

    let entries = records
        .into_iter()
        .map(into_entry)
        .collect::<Result<Vec<_>, DatasetError>>()?;

    tracing::info!(entries = entries.len(), "loaded atlas");
    Ok(Dataset::new(entries))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn into_entry(record: AtlasRecord) -> Result<AtlasEntry, DatasetError> {
    let id = parse_id(&record.id)?;

    let boundaries = record
        .path
        .into_iter()
        .map(|(period, value)| -> Result<Boundary, DatasetError> {
            let points: Vec<[f64; 2]> = serde_json::from_value(value)?;
            Ok(Boundary::new(period, points.into_iter().map(Vertex::from).collect()))
        })
        .collect::<Result<Vec<_>, DatasetError>>()?;

    Ok(AtlasEntry { id, name: record.name, boundaries })
}

fn parse_id(raw: &RawId) -> Result<EntityId, DatasetError> {
    let n = match raw {
        RawId::Int(n) => *n,
        RawId::Text(s) => s.trim().parse::<u64>().map_err(|_| {
            DatasetError::Parse(format!("invalid entity id {s:?}: expected an integer"))
        })?,
    };
    EntityId::try_from(n)
        .map_err(|_| DatasetError::Parse(format!("entity id {n} does not fit in 32 bits")))
}
