//! `ar-pipeline` — from atlas boundaries to ranked animation keyframes.
//!
//! # Stages
//!
//! ```text
//! Dataset + TimeIndexTable
//!   ① Samples    — area of every boundary, one sample per resolved time index
//!                  (parallel with the `parallel` feature).
//!   ② Aggregate  — bucket by timestamp, then by entity (MergePolicy resolves
//!                  duplicates; FirstWins by default).
//!   ③ Keyframes  — `steps` linear sub-frames per consecutive pair, each ranked
//!                  by the Ranker, plus one exact final keyframe.
//!   ④ Index      — per-entity record series for previous/next lookups.
//! ```
//!
//! Every stage is a pure function of its predecessor's output; [`Pipeline`]
//! only threads them together.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Builds samples on Rayon's thread pool.                   |
//! | `fx-hash`  | FxHash for entity-keyed maps.                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ar_core::{RaceConfig, SingleIndexPolicy};
//! use ar_pipeline::PipelineBuilder;
//!
//! let config = RaceConfig::new(10, 8, SingleIndexPolicy::Placeholder);
//! let output = PipelineBuilder::new(config, dataset, table).build()?.run()?;
//! for kf in &output.keyframes {
//!     println!("{}: {:?}", kf.time, kf.top().map(|r| &r.name).collect::<Vec<_>>());
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod frame_index;
pub mod keyframe;
pub mod pipeline;
pub mod rank;
pub mod sample;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregatedTimestamp, aggregate};
pub use error::{PipelineError, PipelineResult};
pub use frame_index::{FrameIndex, FrameWindow};
pub use keyframe::{Keyframe, interpolate};
pub use pipeline::{Pipeline, PipelineBuilder, RaceOutput};
pub use rank::{RankedRecord, Ranker, clamp_ranks};
pub use sample::{RejectedPeriod, Sample, SampleSet, boundary_samples, build_samples, period_samples};

/// Entity-keyed map used by aggregation and the frame index.
#[cfg(feature = "fx-hash")]
pub type IdMap<V> = rustc_hash::FxHashMap<ar_core::EntityId, V>;

/// Entity-keyed map used by aggregation and the frame index.
#[cfg(not(feature = "fx-hash"))]
pub type IdMap<V> = std::collections::HashMap<ar_core::EntityId, V>;
