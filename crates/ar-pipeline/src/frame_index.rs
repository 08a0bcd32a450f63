//! Per-entity lookup over the keyframe sequence.
//!
//! The animation layer needs, for entity `id` at keyframe `i`, the record it
//! is moving *from* and the one it is moving *to*.  Looking those up in the
//! keyframes directly is a linear scan per record; the index groups every
//! entity's records once so each lookup is O(1).
//!
//! ```text
//! series[id][i] == keyframes[i].record(id)
//! previous(i)   =  series[id][max(i - 1, 0)]
//! next(i)       =  series[id][min(i + 1, last)]
//! ```

use ar_core::EntityId;

use crate::{IdMap, Keyframe, RankedRecord};

/// Records of one entity at keyframes `i - 1`, `i` and `i + 1`, clamped at
/// both ends of the sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameWindow<'a> {
    pub previous: &'a RankedRecord,
    pub current:  &'a RankedRecord,
    pub next:     &'a RankedRecord,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameIndex {
    series:    IdMap<Vec<RankedRecord>>,
    keyframes: usize,
}

impl FrameIndex {
    /// Group every keyframe's records by entity, in keyframe order.
    pub fn build(keyframes: &[Keyframe]) -> Self {
        let mut series: IdMap<Vec<RankedRecord>> = IdMap::default();
        for keyframe in keyframes {
            for record in &keyframe.records {
                series
                    .entry(record.id)
                    .or_insert_with(|| Vec::with_capacity(keyframes.len()))
                    .push(record.clone());
            }
        }
        Self { series, keyframes: keyframes.len() }
    }

    /// Number of keyframes indexed; every series has this length.
    pub fn keyframe_count(&self) -> usize {
        self.keyframes
    }

    /// Number of distinct entities.
    pub fn entity_count(&self) -> usize {
        self.series.len()
    }

    /// The full ordered series for `id`.
    pub fn series(&self, id: EntityId) -> Option<&[RankedRecord]> {
        self.series.get(&id).map(Vec::as_slice)
    }

    /// Record of `id` at keyframe `i`.
    pub fn at(&self, id: EntityId, i: usize) -> Option<&RankedRecord> {
        self.series.get(&id)?.get(i)
    }

    /// Record of `id` at keyframe `max(i - 1, 0)`.
    pub fn previous(&self, id: EntityId, i: usize) -> Option<&RankedRecord> {
        self.window(id, i).map(|w| w.previous)
    }

    /// Record of `id` at keyframe `min(i + 1, last)`.
    pub fn next(&self, id: EntityId, i: usize) -> Option<&RankedRecord> {
        self.window(id, i).map(|w| w.next)
    }

    /// Previous, current and next records of `id` around keyframe `i`.
    ///
    /// `None` if `id` is unknown or `i` is past the last keyframe.
    pub fn window(&self, id: EntityId, i: usize) -> Option<FrameWindow<'_>> {
        let series = self.series.get(&id)?;
        let current = series.get(i)?;
        let last = series.len() - 1;
        Some(FrameWindow {
            previous: &series[i.saturating_sub(1)],
            current,
            next:     &series[(i + 1).min(last)],
        })
    }
}
