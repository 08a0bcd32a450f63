//! Unit and integration tests for ar-pipeline.

use ar_core::{
    EntityId, MergePolicy, RaceConfig, SingleIndexPolicy, TimeIndexTable, Timestamp, Vertex,
};
use ar_dataset::{AtlasEntry, Dataset, Roster};

use crate::{PipelineBuilder, RankedRecord, Sample};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rect(w: f64, h: f64) -> Vec<Vertex> {
    vec![
        Vertex::new(0.0, 0.0),
        Vertex::new(0.0, h),
        Vertex::new(w, h),
        Vertex::new(w, 0.0),
    ]
}

fn table() -> TimeIndexTable {
    TimeIndexTable::new(vec![100.0, 200.0, 300.0, 400.0])
}

/// Four entities over four time indices:
///
/// ```text
///            t=100  t=200  t=300  t=400
/// Alpha (1)   100    100    200    200
/// Beta  (2)   150    150    150    150
/// Gamma (3)    -      25     25     -
/// Delta (4)   (every period rejected)
/// ```
fn dataset() -> Dataset {
    Dataset::new(vec![
        AtlasEntry::new(EntityId(1), "Alpha")
            .with_boundary("0-1", rect(10.0, 10.0))
            .with_boundary("2-3, T", rect(20.0, 10.0)),
        AtlasEntry::new(EntityId(2), "Beta").with_boundary("0-3, T", rect(15.0, 10.0)),
        AtlasEntry::new(EntityId(3), "Gamma").with_boundary("1-2", rect(5.0, 5.0)),
        AtlasEntry::new(EntityId(4), "Delta")
            .with_boundary("1-2, bogus", rect(50.0, 50.0))
            .with_boundary("2-9", rect(50.0, 50.0)),
    ])
}

fn config(max_rank: usize, steps: usize) -> RaceConfig {
    RaceConfig::new(max_rank, steps, SingleIndexPolicy::Placeholder)
}

fn sample(id: u32, time: f64, value: u64) -> Sample {
    Sample { id: EntityId(id), time: Timestamp(time), value }
}

fn ids(records: &[RankedRecord]) -> Vec<u32> {
    records.iter().map(|r| r.id.0).collect()
}

fn ranks(records: &[RankedRecord]) -> Vec<usize> {
    records.iter().map(|r| r.rank).collect()
}

// ── Sample builder ────────────────────────────────────────────────────────────

#[cfg(test)]
mod samples {
    use super::*;
    use crate::{PipelineError, boundary_samples, build_samples, period_samples};
    use ar_core::CoreError;
    use ar_dataset::{Boundary, DatasetError, Period};

    #[test]
    fn range_resolves_every_index() {
        let b = Boundary::new("1-3", rect(10.0, 10.0));
        let out = boundary_samples(EntityId(7), &b, &table(), SingleIndexPolicy::Placeholder);
        assert!(out.rejected.is_empty());
        assert_eq!(out.samples, vec![sample(7, 200.0, 100), sample(7, 300.0, 100), sample(7, 400.0, 100)]);
    }

    #[test]
    fn single_index_placeholder_uses_first_entry() {
        let b = Boundary::new("3, T", rect(2.0, 3.0));
        let out = boundary_samples(EntityId(1), &b, &table(), SingleIndexPolicy::Placeholder);
        assert_eq!(out.samples, vec![sample(1, 100.0, 6)]);
    }

    #[test]
    fn single_index_literal_uses_index_as_time() {
        let b = Boundary::new("3", rect(2.0, 3.0));
        let out = boundary_samples(EntityId(1), &b, &table(), SingleIndexPolicy::LiteralIndex);
        assert_eq!(out.samples, vec![sample(1, 3.0, 6)]);
    }

    #[test]
    fn placeholder_with_empty_table_is_out_of_range() {
        let err = period_samples(
            EntityId(1),
            Period::Single(3),
            6,
            &TimeIndexTable::default(),
            SingleIndexPolicy::Placeholder,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Core(CoreError::IndexOutOfRange { index: 0, len: 0 })));
    }

    #[test]
    fn range_past_table_is_out_of_range() {
        let period = Period::Range { start: 2, end: 4 };
        let err = period_samples(EntityId(1), period, 6, &table(), SingleIndexPolicy::Placeholder).unwrap_err();
        assert!(matches!(err, PipelineError::Core(CoreError::IndexOutOfRange { index: 4, len: 4 })));
    }

    #[test]
    fn out_of_range_period_keeps_its_siblings() {
        let b = Boundary::new("0-1, 2-9", rect(10.0, 10.0));
        let out = boundary_samples(EntityId(1), &b, &table(), SingleIndexPolicy::Placeholder);

        assert_eq!(out.samples, vec![sample(1, 100.0, 100), sample(1, 200.0, 100)]);
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].period, "2-9");
        assert!(matches!(
            out.rejected[0].error,
            PipelineError::Core(CoreError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn malformed_string_rejects_every_period() {
        let b = Boundary::new("0-1, bogus", rect(10.0, 10.0));
        let out = boundary_samples(EntityId(1), &b, &table(), SingleIndexPolicy::Placeholder);

        assert!(out.samples.is_empty());
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].period, "0-1, bogus");
    }

    #[test]
    fn rejected_periods_are_scoped() {
        let set = build_samples(&dataset(), &table(), SingleIndexPolicy::Placeholder);

        assert_eq!(set.rejected.len(), 2);
        assert!(set.rejected.iter().all(|r| r.entity == EntityId(4)));
        assert!(set.rejected.iter().all(|r| r.error.is_scoped()));
        assert!(matches!(
            set.rejected[0].error,
            PipelineError::Dataset(DatasetError::MalformedPeriod { .. })
        ));
        assert_eq!(set.rejected[1].period, "2-9");

        // Alpha 2 + 2, Beta 4, Gamma 2.
        assert_eq!(set.samples.len(), 10);
        assert!(set.samples.iter().all(|s| s.id != EntityId(4)));
    }

    #[test]
    fn sample_order_follows_dataset_order() {
        let set = build_samples(&dataset(), &table(), SingleIndexPolicy::Placeholder);
        let first_ids: Vec<u32> = set.samples.iter().map(|s| s.id.0).collect();
        assert_eq!(first_ids, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3]);
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregation {
    use super::*;
    use crate::aggregate;

    #[test]
    fn sorted_ascending_by_time() {
        let samples = vec![sample(1, 300.0, 1), sample(1, 100.0, 2), sample(2, 200.0, 3)];
        let agg = aggregate(&samples, MergePolicy::FirstWins);
        let times: Vec<f64> = agg.iter().map(|a| a.time.secs()).collect();
        assert_eq!(times, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn first_wins_keeps_earliest_sample() {
        let samples = vec![sample(1, 100.0, 5), sample(1, 100.0, 9)];
        let agg = aggregate(&samples, MergePolicy::FirstWins);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].get(EntityId(1)), Some(5));
    }

    #[test]
    fn last_wins_keeps_latest_sample() {
        let samples = vec![sample(1, 100.0, 5), sample(1, 100.0, 9)];
        let agg = aggregate(&samples, MergePolicy::LastWins);
        assert_eq!(agg[0].get(EntityId(1)), Some(9));
    }

    #[test]
    fn overlapping_periods_resolve_first_wins() {
        let ds = Dataset::new(vec![
            AtlasEntry::new(EntityId(1), "Overlap")
                .with_boundary("0-2", rect(10.0, 10.0))
                .with_boundary("1-3", rect(20.0, 20.0)),
        ]);
        let out = PipelineBuilder::new(config(5, 1), ds, table()).build().unwrap().run().unwrap();
        let values: Vec<Option<u64>> = out.aggregated.iter().map(|a| a.get(EntityId(1))).collect();
        assert_eq!(values, vec![Some(100), Some(100), Some(100), Some(400)]);
    }

    #[test]
    fn absent_entity_reads_zero() {
        let agg = aggregate(&[sample(1, 100.0, 5)], MergePolicy::FirstWins);
        assert_eq!(agg[0].get(EntityId(2)), None);
        assert_eq!(agg[0].value_or_zero(EntityId(2)), 0.0);
    }
}

// ── Ranker ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ranker {
    use super::*;
    use crate::{Ranker, clamp_ranks};

    fn roster5() -> Roster {
        (1..=5u32).map(|i| (EntityId(i), format!("e{i}"))).collect()
    }

    #[test]
    fn sorts_descending_and_clamps() {
        let values = [0.0, 10.0, 40.0, 20.0, 30.0, 5.0];
        let out = Ranker::new(3).rank(&roster5(), |id| values[id.0 as usize]);
        assert_eq!(ids(&out), vec![2, 4, 3, 1, 5]);
        assert_eq!(ranks(&out), vec![0, 1, 2, 3, 3]);
    }

    #[test]
    fn ties_keep_roster_order() {
        let out = Ranker::new(10).rank(&roster5(), |id| if id.0 == 4 { 1.0 } else { 0.0 });
        assert_eq!(ids(&out), vec![4, 1, 2, 3, 5]);
        assert_eq!(ranks(&out), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn n_larger_than_roster_never_clamps() {
        let out = Ranker::new(100).rank(&roster5(), |id| id.0 as f64);
        assert_eq!(ranks(&out), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn clamp_is_independent_step() {
        let mut records: Vec<RankedRecord> = (0..6)
            .map(|i| RankedRecord { id: EntityId(i), name: "x".into(), value: 0.0, rank: i as usize })
            .collect();
        clamp_ranks(&mut records, 2);
        assert_eq!(ranks(&records), vec![0, 1, 2, 2, 2, 2]);
        assert!(records[1].is_on_chart(2));
        assert!(!records[2].is_on_chart(2));
    }

    #[test]
    fn carries_names() {
        let out = Ranker::new(1).rank(&roster5(), |_| 0.0);
        assert_eq!(&*out[0].name, "e1");
    }
}

// ── Keyframe interpolation ────────────────────────────────────────────────────

#[cfg(test)]
mod keyframes {
    use super::*;
    use crate::{PipelineError, Ranker, aggregate, interpolate};

    fn aggregated() -> Vec<crate::AggregatedTimestamp> {
        aggregate(
            &[sample(1, 100.0, 100), sample(2, 100.0, 50), sample(2, 200.0, 300)],
            MergePolicy::FirstWins,
        )
    }

    fn roster() -> Roster {
        [(EntityId(1), "one"), (EntityId(2), "two")].into_iter().collect()
    }

    #[test]
    fn steps_one_is_one_keyframe_per_timestamp() {
        let agg = aggregated();
        let kfs = interpolate(&agg, &roster(), &Ranker::new(5), 1).unwrap();
        assert_eq!(kfs.len(), agg.len());
        assert_eq!(kfs[0].time, Timestamp(100.0));
        assert_eq!(kfs[1].time, Timestamp(200.0));
    }

    #[test]
    fn midpoint_blends_values_and_missing_is_zero() {
        let kfs = interpolate(&aggregated(), &roster(), &Ranker::new(5), 2).unwrap();
        assert_eq!(kfs.len(), 3);
        let mid = &kfs[1];
        assert_eq!(mid.time, Timestamp(150.0));
        // One: 100 → absent (0).  Two: 50 → 300.
        assert_eq!(mid.record(EntityId(1)).unwrap().value, 50.0);
        assert_eq!(mid.record(EntityId(2)).unwrap().value, 175.0);
        assert_eq!(ids(&mid.records), vec![2, 1]);
    }

    #[test]
    fn first_subframe_is_exact_left_point() {
        let kfs = interpolate(&aggregated(), &roster(), &Ranker::new(5), 4).unwrap();
        assert_eq!(kfs[0].record(EntityId(1)).unwrap().value, 100.0);
        assert_eq!(kfs[0].record(EntityId(2)).unwrap().value, 50.0);
        assert_eq!(ids(&kfs[0].records), vec![1, 2]);
    }

    #[test]
    fn times_strictly_increase() {
        let kfs = interpolate(&aggregated(), &roster(), &Ranker::new(5), 7).unwrap();
        assert_eq!(kfs.len(), 8);
        assert!(kfs.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn single_timestamp_yields_one_keyframe() {
        let agg = aggregate(&[sample(1, 100.0, 1)], MergePolicy::FirstWins);
        let kfs = interpolate(&agg, &roster(), &Ranker::new(5), 10).unwrap();
        assert_eq!(kfs.len(), 1);
    }

    #[test]
    fn empty_input_is_empty_dataset() {
        let err = interpolate(&[], &roster(), &Ranker::new(5), 3).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset(_)));
    }

    #[test]
    fn zero_steps_rejected() {
        assert!(interpolate(&aggregated(), &roster(), &Ranker::new(5), 0).is_err());
    }

    #[test]
    fn overflowing_steps_rejected() {
        let agg = aggregate(&[sample(1, 100.0, 1), sample(1, 200.0, 2)], MergePolicy::FirstWins);
        let err = interpolate(&agg, &roster(), &Ranker::new(1), usize::MAX).unwrap_err();
        assert!(matches!(err, PipelineError::Core(ar_core::CoreError::Config(_))));
    }

    #[test]
    fn top_stops_at_cutoff() {
        let kfs = interpolate(&aggregated(), &roster(), &Ranker::new(1), 1).unwrap();
        let top: Vec<u32> = kfs[1].top(1).map(|r| r.id.0).collect();
        assert_eq!(top, vec![2]);
    }
}

// ── Frame index ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod frame_index {
    use super::*;
    use crate::FrameIndex;

    fn output() -> crate::RaceOutput {
        PipelineBuilder::new(config(2, 3), dataset(), table()).build().unwrap().run().unwrap()
    }

    #[test]
    fn series_length_matches_keyframes() {
        let out = output();
        assert_eq!(out.frame_index.keyframe_count(), out.keyframes.len());
        assert_eq!(out.frame_index.entity_count(), 4);
        for id in 1..=4 {
            assert_eq!(out.frame_index.series(EntityId(id)).unwrap().len(), out.keyframes.len());
        }
    }

    #[test]
    fn series_entry_matches_keyframe_record() {
        let out = output();
        for (i, kf) in out.keyframes.iter().enumerate() {
            for record in &kf.records {
                assert_eq!(out.frame_index.at(record.id, i), Some(record));
            }
        }
    }

    #[test]
    fn previous_and_next_clamp_at_ends() {
        let out = output();
        let idx = &out.frame_index;
        let last = out.keyframes.len() - 1;
        let id = EntityId(3);

        assert_eq!(idx.previous(id, 0), idx.at(id, 0));
        assert_eq!(idx.next(id, last), idx.at(id, last));
        assert_eq!(idx.previous(id, 2), idx.at(id, 1));
        assert_eq!(idx.next(id, 2), idx.at(id, 3));

        let w = idx.window(id, 0).unwrap();
        assert_eq!(w.previous, w.current);
    }

    #[test]
    fn unknown_id_or_index_is_none() {
        let out = output();
        assert!(out.frame_index.at(EntityId(99), 0).is_none());
        assert!(out.frame_index.window(EntityId(1), out.keyframes.len()).is_none());
        assert!(FrameIndex::build(&[]).series(EntityId(1)).is_none());
    }
}

// ── Full pipeline ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use super::*;
    use crate::{PipelineError, Ranker};

    #[test]
    fn aggregated_matches_fixture() {
        let out = PipelineBuilder::new(config(2, 1), dataset(), table()).build().unwrap().run().unwrap();
        assert_eq!(out.sample_count, 10);
        assert_eq!(out.rejected.len(), 2);
        assert_eq!(out.aggregated.len(), 4);

        let gamma: Vec<Option<u64>> = out.aggregated.iter().map(|a| a.get(EntityId(3))).collect();
        assert_eq!(gamma, vec![None, Some(25), Some(25), None]);
        let alpha: Vec<Option<u64>> = out.aggregated.iter().map(|a| a.get(EntityId(1))).collect();
        assert_eq!(alpha, vec![Some(100), Some(100), Some(200), Some(200)]);
    }

    #[test]
    fn keyframe_count_is_pairs_times_steps_plus_one() {
        let out = PipelineBuilder::new(config(2, 4), dataset(), table()).build().unwrap().run().unwrap();
        assert_eq!(out.keyframes.len(), 3 * 4 + 1);

        let k1 = PipelineBuilder::new(config(2, 1), dataset(), table()).build().unwrap().run().unwrap();
        assert_eq!(k1.keyframes.len(), k1.aggregated.len());
    }

    #[test]
    fn last_keyframe_is_exact() {
        let p = PipelineBuilder::new(config(2, 5), dataset(), table()).build().unwrap();
        let out = p.run().unwrap();
        let last_agg = out.aggregated.last().unwrap();
        let direct = Ranker::new(2).rank(&p.roster, |id| last_agg.value_or_zero(id));

        let last = out.last_keyframe().unwrap();
        assert_eq!(last.time, last_agg.time);
        assert_eq!(last.records, direct);
        // Alpha 200, Beta 150, then Gamma and Delta tied at 0 in roster order.
        assert_eq!(ids(&last.records), vec![1, 2, 3, 4]);
        assert_eq!(ranks(&last.records), vec![0, 1, 2, 2]);
    }

    #[test]
    fn ranks_dense_and_clamped_in_every_keyframe() {
        let n = 2;
        let out = PipelineBuilder::new(config(n, 3), dataset(), table()).build().unwrap().run().unwrap();
        for kf in &out.keyframes {
            assert_eq!(kf.records.len(), 4);
            for (pos, r) in kf.records.iter().enumerate() {
                assert_eq!(r.rank, pos.min(n));
            }
            assert!(kf.records.windows(2).all(|w| w[0].value >= w[1].value));
            for w in kf.records.windows(2) {
                if w[0].rank == w[1].rank {
                    assert!(w[0].rank == n || w[0].value == w[1].value);
                }
            }
        }
    }

    #[test]
    fn idempotent() {
        let p = PipelineBuilder::new(config(3, 6), dataset(), table()).build().unwrap();
        let a = p.run().unwrap();
        let b = p.run().unwrap();
        assert_eq!(a.keyframes, b.keyframes);
        assert_eq!(a.aggregated, b.aggregated);
        assert_eq!(a.frame_index, b.frame_index);

        let c = PipelineBuilder::new(config(3, 6), dataset(), table()).build().unwrap().run().unwrap();
        assert_eq!(a.keyframes, c.keyframes);
    }

    #[test]
    fn empty_dataset_rejected_at_build() {
        let result = PipelineBuilder::new(config(2, 2), Dataset::default(), table()).build();
        assert!(matches!(result, Err(PipelineError::EmptyDataset(_))));
    }

    #[test]
    fn no_valid_sample_is_fatal() {
        let ds = Dataset::new(vec![AtlasEntry::new(EntityId(1), "Bad").with_boundary("x-y", rect(1.0, 1.0))]);
        let result = PipelineBuilder::new(config(2, 2), ds, table()).build().unwrap().run();
        assert!(matches!(result, Err(PipelineError::EmptyDataset(_))));
    }

    #[test]
    fn invalid_config_rejected_at_build() {
        let result = PipelineBuilder::new(config(0, 2), dataset(), table()).build();
        assert!(matches!(result, Err(PipelineError::Core(_))));
    }

    #[test]
    fn literal_index_policy_adds_its_own_timestamps() {
        let ds = Dataset::new(vec![
            AtlasEntry::new(EntityId(1), "Range").with_boundary("0-1", rect(2.0, 2.0)),
            AtlasEntry::new(EntityId(2), "Point").with_boundary("3", rect(3.0, 3.0)),
        ]);
        let cfg = RaceConfig::new(5, 1, SingleIndexPolicy::LiteralIndex);
        let out = PipelineBuilder::new(cfg, ds, table()).build().unwrap().run().unwrap();
        let times: Vec<f64> = out.aggregated.iter().map(|a| a.time.secs()).collect();
        assert_eq!(times, vec![3.0, 100.0, 200.0]);
    }
}
