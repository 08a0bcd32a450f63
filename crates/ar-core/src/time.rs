//! Time model.
//!
//! # Design
//!
//! The dataset does not carry wall-clock times.  Boundary periods refer to
//! integer *time indices*, and a [`TimeIndexTable`] supplied at startup maps
//! each index to a Unix timestamp:
//!
//! ```text
//!   unix_secs = table[index]
//! ```
//!
//! Interpolated keyframes fall between table entries, so a [`Timestamp`] is
//! an `f64` number of seconds.  It is totally ordered (via `f64::total_cmp`)
//! so it can key a `BTreeMap` during aggregation.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

// ── Timestamp ────────────────────────────────────────────────────────────────

/// Seconds since the Unix epoch, possibly fractional.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Linear interpolation: `a * (1 - t) + b * t`.
    ///
    /// `t = 0` returns `a` exactly; `t = 1` returns `b` exactly.
    #[inline]
    pub fn lerp(a: Timestamp, b: Timestamp, t: f64) -> Timestamp {
        Timestamp(a.0 * (1.0 - t) + b.0 * t)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Timestamp {
    #[inline]
    fn from(secs: f64) -> Self {
        Timestamp(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── TimeIndexTable ───────────────────────────────────────────────────────────

/// Fixed, read-only mapping from integer time index to timestamp.
///
/// Established once at startup and shared by every pipeline run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeIndexTable {
    entries: Vec<Timestamp>,
}

impl TimeIndexTable {
    /// Build a table from Unix seconds, indexed by position.
    pub fn new(unix_secs: Vec<f64>) -> Self {
        Self {
            entries: unix_secs.into_iter().map(Timestamp).collect(),
        }
    }

    /// Timestamp for `index`.
    ///
    /// # Errors
    ///
    /// [`CoreError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn resolve(&self, index: u32) -> CoreResult<Timestamp> {
        self.entries
            .get(index as usize)
            .copied()
            .ok_or(CoreError::IndexOutOfRange { index, len: self.entries.len() })
    }

    /// Entry 0, or `None` for an empty table.
    pub fn first(&self) -> Option<Timestamp> {
        self.entries.first().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.entries.iter().copied()
    }
}
