//! Time-bucket aggregation: samples → one value map per distinct timestamp.

use std::collections::BTreeMap;

use ar_core::{EntityId, MergePolicy, Timestamp};

use crate::{IdMap, Sample};

/// One directly observed point in time with every entity's known value.
///
/// An entity missing from `values` counts as 0 for interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedTimestamp {
    pub time:   Timestamp,
    pub values: IdMap<u64>,
}

impl AggregatedTimestamp {
    pub fn get(&self, id: EntityId) -> Option<u64> {
        self.values.get(&id).copied()
    }

    /// Value as used by interpolation and ranking.
    #[inline]
    pub fn value_or_zero(&self, id: EntityId) -> f64 {
        self.get(id).map_or(0.0, |v| v as f64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Group `samples` by timestamp, then by entity, in ascending time order.
///
/// When one entity has several samples at the same timestamp, `policy`
/// decides which value is kept; `samples` order is the tie-break order.
pub fn aggregate(samples: &[Sample], policy: MergePolicy) -> Vec<AggregatedTimestamp> {
    let mut buckets: BTreeMap<Timestamp, IdMap<u64>> = BTreeMap::new();

    for sample in samples {
        let bucket = buckets.entry(sample.time).or_default();
        match policy {
            MergePolicy::FirstWins => {
                bucket.entry(sample.id).or_insert(sample.value);
            }
            MergePolicy::LastWins => {
                bucket.insert(sample.id, sample.value);
            }
        }
    }

    tracing::info!(timestamps = buckets.len(), ?policy, "aggregated samples");

    buckets
        .into_iter()
        .map(|(time, values)| AggregatedTimestamp { time, values })
        .collect()
}
