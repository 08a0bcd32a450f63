//! Race configuration.
//!
//! Typically built in code by the application, or loaded from a JSON/TOML
//! file with the `serde` feature, and passed to the pipeline builder.

use crate::{CoreError, CoreResult};

// ── SingleIndexPolicy ─────────────────────────────────────────────────────────

/// How a single-index period (`"42"`, as opposed to `"40-45"`) is turned into
/// a sample timestamp.
///
/// Two variants of the atlas tooling disagree here, so the choice is always
/// explicit: there is deliberately no `Default` impl.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SingleIndexPolicy {
    /// Use entry 0 of the time-index table, whatever the index is.
    Placeholder,
    /// Use the index value itself as the timestamp, in seconds.
    LiteralIndex,
}

// ── MergePolicy ───────────────────────────────────────────────────────────────

/// Which sample wins when one entity has several samples at one timestamp
/// (overlapping periods).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MergePolicy {
    /// Keep the first sample in build order.  A later overlapping period
    /// never overrides an already-recorded value.
    #[default]
    FirstWins,
    /// Keep the last sample in build order.
    LastWins,
}

// ── RaceConfig ────────────────────────────────────────────────────────────────

/// Top-level pipeline configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceConfig {
    /// `n`: ranks `0..n` are on the chart; every entity past position `n`
    /// reports rank `n`.  Must be ≥ 1.
    pub max_rank: usize,

    /// `k`: keyframes generated per pair of consecutive aggregated
    /// timestamps.  1 disables interpolation.  Must be ≥ 1.
    pub steps: usize,

    pub single_index: SingleIndexPolicy,

    #[cfg_attr(feature = "serde", serde(default))]
    pub merge: MergePolicy,
}

impl RaceConfig {
    pub fn new(max_rank: usize, steps: usize, single_index: SingleIndexPolicy) -> Self {
        Self {
            max_rank,
            steps,
            single_index,
            merge: MergePolicy::default(),
        }
    }

    pub fn with_merge(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }

    /// Reject `n = 0` and `k = 0`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_rank == 0 {
            return Err(CoreError::Config("max_rank (n) must be at least 1".into()));
        }
        if self.steps == 0 {
            return Err(CoreError::Config("steps (k) must be at least 1".into()));
        }
        Ok(())
    }
}
