//! Sample builder: boundaries → (entity, time, area) samples.
//!
//! # Ordering
//!
//! Samples come out in dataset entry order, then boundary order within an
//! entry, then period and index order within a boundary.  Aggregation's
//! first-wins rule depends on this order, so the parallel build collects
//! per-entry results in entry order before concatenating.
//!
//! # Failures
//!
//! A malformed period string discards that whole (entity, period string)
//! pair.  An index outside the time-index table discards only the period
//! (`[i]` or `[start, end]`) that holds it; a range never contributes a
//! prefix.  Both are reported in [`SampleSet::rejected`]; everything else
//! still contributes.

use ar_core::{EntityId, SingleIndexPolicy, TimeIndexTable, Timestamp, polygon_area};
use ar_dataset::{AtlasEntry, Boundary, Dataset, Period, parse_periods};

use crate::{PipelineError, PipelineResult};

/// Area of one entity at one concrete time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub id:    EntityId,
    pub time:  Timestamp,
    pub value: u64,
}

/// A period string, or one period within it, that produced no samples.
#[derive(Debug)]
pub struct RejectedPeriod {
    pub entity: EntityId,
    /// The whole period string on a parse failure, otherwise the failing
    /// period alone (`"2-9"`).
    pub period: String,
    pub error:  PipelineError,
}

/// Output of [`build_samples`].
#[derive(Debug, Default)]
pub struct SampleSet {
    pub samples:  Vec<Sample>,
    pub rejected: Vec<RejectedPeriod>,
}

impl SampleSet {
    fn append(&mut self, mut other: SampleSet) {
        self.samples.append(&mut other.samples);
        self.rejected.append(&mut other.rejected);
    }

    fn reject(&mut self, entity: EntityId, period: String, error: PipelineError) {
        tracing::warn!(id = %entity, %period, %error, "skipping boundary period");
        self.rejected.push(RejectedPeriod { entity, period, error });
    }
}

/// Build samples for every boundary of every entry.
pub fn build_samples(
    dataset: &Dataset,
    table:   &TimeIndexTable,
    policy:  SingleIndexPolicy,
) -> SampleSet {
    #[cfg(not(feature = "parallel"))]
    let per_entry: Vec<SampleSet> = dataset
        .entries
        .iter()
        .map(|entry| entry_samples(entry, table, policy))
        .collect();

    #[cfg(feature = "parallel")]
    let per_entry: Vec<SampleSet> = {
        use rayon::prelude::*;

        // Indexed collect keeps entry order regardless of scheduling.
        dataset
            .entries
            .par_iter()
            .map(|entry| entry_samples(entry, table, policy))
            .collect()
    };

    let mut out = SampleSet::default();
    for set in per_entry {
        out.append(set);
    }

    tracing::info!(
        samples = out.samples.len(),
        rejected = out.rejected.len(),
        "built samples"
    );
    out
}

/// Samples for a single boundary, with one rejection per failing period.
///
/// A period string that does not parse is rejected as a whole.  Otherwise
/// each [`Period`] resolves on its own, so `"0-1, 2-9"` against a
/// four-entry table keeps the `0-1` samples and rejects `2-9`.
pub fn boundary_samples(
    id:       EntityId,
    boundary: &Boundary,
    table:    &TimeIndexTable,
    policy:   SingleIndexPolicy,
) -> SampleSet {
    let mut set = SampleSet::default();

    let periods = match parse_periods(&boundary.period) {
        Ok(periods) => periods,
        Err(error) => {
            set.reject(id, boundary.period.clone(), error.into());
            return set;
        }
    };
    let value = polygon_area(&boundary.vertices);

    for &period in &periods.periods {
        match period_samples(id, period, value, table, policy) {
            Ok(mut samples) => set.samples.append(&mut samples),
            Err(error) => set.reject(id, period.to_string(), error),
        }
    }
    set
}

/// Samples for one period of a boundary whose area is `value`.
///
/// # Errors
///
/// [`PipelineError::Core`] with `IndexOutOfRange` if a range reaches past the
/// table (or the table is empty under [`SingleIndexPolicy::Placeholder`]).
/// No samples of the period are returned in that case.
pub fn period_samples(
    id:     EntityId,
    period: Period,
    value:  u64,
    table:  &TimeIndexTable,
    policy: SingleIndexPolicy,
) -> PipelineResult<Vec<Sample>> {
    match period {
        Period::Single(index) => {
            let time = single_index_time(index, table, policy)?;
            Ok(vec![Sample { id, time, value }])
        }
        Period::Range { start, end } => (start..=end)
            .map(|index| -> PipelineResult<Sample> {
                Ok(Sample { id, time: table.resolve(index)?, value })
            })
            .collect(),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn entry_samples(entry: &AtlasEntry, table: &TimeIndexTable, policy: SingleIndexPolicy) -> SampleSet {
    let mut set = SampleSet::default();
    for boundary in &entry.boundaries {
        set.append(boundary_samples(entry.id, boundary, table, policy));
    }
    set
}

fn single_index_time(
    index:  u32,
    table:  &TimeIndexTable,
    policy: SingleIndexPolicy,
) -> PipelineResult<Timestamp> {
    match policy {
        SingleIndexPolicy::Placeholder => Ok(table.resolve(0)?),
        SingleIndexPolicy::LiteralIndex => Ok(Timestamp(f64::from(index))),
    }
}
