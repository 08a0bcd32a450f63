//! Keyframe interpolator.
//!
//! For consecutive aggregated timestamps `(ta, A)` and `(tb, B)` and
//! `steps = k`:
//!
//! ```text
//! for i in 0..k:
//!     t     = i / k
//!     time  = ta * (1 - t) + tb * t
//!     value = A[id] * (1 - t) + B[id] * t      (missing → 0)
//! ```
//!
//! After the last pair one more keyframe is ranked from the final aggregated
//! values themselves, so the sequence always ends on an observed point.

use ar_core::{CoreError, EntityId, Timestamp};
use ar_dataset::Roster;

use crate::{AggregatedTimestamp, PipelineError, PipelineResult, RankedRecord, Ranker};

/// One ranked snapshot of every roster entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub time:    Timestamp,
    /// Ordered by rank (descending value).
    pub records: Vec<RankedRecord>,
}

impl Keyframe {
    /// Records on the chart (rank below `max_rank`), best first.
    pub fn top(&self, max_rank: usize) -> impl Iterator<Item = &RankedRecord> + '_ {
        self.records.iter().take_while(move |r| r.is_on_chart(max_rank))
    }

    pub fn record(&self, id: EntityId) -> Option<&RankedRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// Interpolate `steps` keyframes per consecutive pair of `aggregated`.
///
/// Produces `(aggregated.len() - 1) * steps + 1` keyframes in ascending time.
///
/// # Errors
///
/// - [`PipelineError::EmptyDataset`] if `aggregated` is empty.
/// - [`PipelineError::Core`] if `steps` is 0, or so large that the keyframe
///   count overflows `usize`.
pub fn interpolate(
    aggregated: &[AggregatedTimestamp],
    roster:     &Roster,
    ranker:     &Ranker,
    steps:      usize,
) -> PipelineResult<Vec<Keyframe>> {
    if steps == 0 {
        return Err(CoreError::Config("steps (k) must be at least 1".into()).into());
    }
    let Some(last) = aggregated.last() else {
        return Err(PipelineError::EmptyDataset("no aggregated timestamps to interpolate"));
    };

    let total = (aggregated.len() - 1)
        .checked_mul(steps)
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| CoreError::Config(format!("steps (k) = {steps} overflows the keyframe count")))?;
    let mut keyframes = Vec::with_capacity(total);

    for pair in aggregated.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let records = ranker.rank(roster, |id| {
                a.value_or_zero(id) * (1.0 - t) + b.value_or_zero(id) * t
            });
            keyframes.push(Keyframe { time: Timestamp::lerp(a.time, b.time, t), records });
        }
        tracing::debug!(from = %a.time, to = %b.time, steps, "interpolated pair");
    }

    keyframes.push(Keyframe {
        time:    last.time,
        records: ranker.rank(roster, |id| last.value_or_zero(id)),
    });

    tracing::info!(keyframes = keyframes.len(), steps, "built keyframes");
    Ok(keyframes)
}
