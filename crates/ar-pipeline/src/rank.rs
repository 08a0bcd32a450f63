//! Ranker: order every roster entity by a value function.
//!
//! # Rank model
//!
//! ```text
//! position = index after a stable descending sort by value
//! rank     = min(position, max_rank)
//! ```
//!
//! Ties keep roster order.  Every entity past the chart cutoff shares the
//! sentinel rank `max_rank`, so the animation layer can park all of them at
//! one off-screen slot.  The clamp is a separate pass ([`clamp_ranks`]) run
//! after positions are assigned.

use std::sync::Arc;

use ar_core::EntityId;
use ar_dataset::Roster;

/// One entity's place in one ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRecord {
    pub id:    EntityId,
    pub name:  Arc<str>,
    pub value: f64,
    pub rank:  usize,
}

impl RankedRecord {
    /// `true` if `rank` is below the cutoff `max_rank`.
    #[inline]
    pub fn is_on_chart(&self, max_rank: usize) -> bool {
        self.rank < max_rank
    }
}

/// Ranks a roster with ranks capped at `max_rank` (`n`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ranker {
    max_rank: usize,
}

impl Ranker {
    pub fn new(max_rank: usize) -> Self {
        Self { max_rank }
    }

    pub fn max_rank(&self) -> usize {
        self.max_rank
    }

    /// Rank every roster entity by `value_of`, highest first.
    pub fn rank<F>(&self, roster: &Roster, value_of: F) -> Vec<RankedRecord>
    where
        F: Fn(EntityId) -> f64,
    {
        let mut records: Vec<RankedRecord> = roster
            .entries()
            .iter()
            .map(|(id, name)| RankedRecord {
                id:    *id,
                name:  Arc::clone(name),
                value: value_of(*id),
                rank:  0,
            })
            .collect();

        // `sort_by` is stable: equal values stay in roster order.
        records.sort_by(|a, b| b.value.total_cmp(&a.value));

        for (position, record) in records.iter_mut().enumerate() {
            record.rank = position;
        }
        clamp_ranks(&mut records, self.max_rank);
        records
    }
}

/// Cap every rank at `max_rank`.
pub fn clamp_ranks(records: &mut [RankedRecord], max_rank: usize) {
    for record in records {
        record.rank = record.rank.min(max_rank);
    }
}
