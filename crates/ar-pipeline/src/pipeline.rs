//! Fluent builder and runner for the full pipeline.

use ar_core::{RaceConfig, TimeIndexTable};
use ar_dataset::{Dataset, Roster};

use crate::{
    AggregatedTimestamp, FrameIndex, Keyframe, PipelineError, PipelineResult, Ranker,
    RejectedPeriod, SampleSet, aggregate, build_samples, interpolate,
};

/// Fluent builder for [`Pipeline`].
///
/// # Required inputs
///
/// - [`RaceConfig`] — `max_rank`, `steps`, single-index and merge policies
/// - [`Dataset`] — the atlas, already loaded
/// - [`TimeIndexTable`] — index → timestamp
///
/// # Example
///
/// ```rust,ignore
/// let output = PipelineBuilder::new(config, dataset, table)
///     .build()?
///     .run()?;
/// ```
pub struct PipelineBuilder {
    config:  RaceConfig,
    dataset: Dataset,
    table:   TimeIndexTable,
}

impl PipelineBuilder {
    pub fn new(config: RaceConfig, dataset: Dataset, table: TimeIndexTable) -> Self {
        Self { config, dataset, table }
    }

    /// Validate inputs, build the roster, and return a ready-to-run [`Pipeline`].
    pub fn build(self) -> PipelineResult<Pipeline> {
        self.config.validate()?;

        if self.dataset.is_empty() {
            return Err(PipelineError::EmptyDataset("dataset has no entities"));
        }
        let roster = self.dataset.roster();

        Ok(Pipeline {
            config:  self.config,
            dataset: self.dataset,
            table:   self.table,
            roster,
        })
    }
}

/// Validated inputs for one or more runs.
///
/// Every call to [`run`][Self::run] rebuilds all derived structures from
/// scratch; the inputs are never mutated.
pub struct Pipeline {
    pub config:  RaceConfig,
    pub dataset: Dataset,
    pub table:   TimeIndexTable,
    /// id → name in dataset order.  Ties in every ranking follow this order.
    pub roster:  Roster,
}

/// Everything a run produces, handed to the rendering layer.
#[derive(Debug)]
pub struct RaceOutput {
    /// `n` the keyframes were ranked with.
    pub max_rank:     usize,
    pub sample_count: usize,
    /// Entity periods skipped because they failed to parse or resolve.
    pub rejected:     Vec<RejectedPeriod>,
    pub aggregated:   Vec<AggregatedTimestamp>,
    pub keyframes:    Vec<Keyframe>,
    pub frame_index:  FrameIndex,
}

impl RaceOutput {
    pub fn last_keyframe(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }
}

impl Pipeline {
    /// Run every stage: samples → aggregate → keyframes → frame index.
    ///
    /// # Errors
    ///
    /// [`PipelineError::EmptyDataset`] if no sample survives.  Per-period
    /// failures do not abort the run; they are listed in
    /// [`RaceOutput::rejected`].
    #[tracing::instrument(
        skip(self),
        fields(entities = self.roster.len(), n = self.config.max_rank, k = self.config.steps)
    )]
    pub fn run(&self) -> PipelineResult<RaceOutput> {
        let SampleSet { samples, rejected } =
            build_samples(&self.dataset, &self.table, self.config.single_index);
        if samples.is_empty() {
            return Err(PipelineError::EmptyDataset("no boundary produced a valid sample"));
        }

        let aggregated = aggregate(&samples, self.config.merge);

        let ranker = Ranker::new(self.config.max_rank);
        let keyframes = interpolate(&aggregated, &self.roster, &ranker, self.config.steps)?;
        let frame_index = FrameIndex::build(&keyframes);

        tracing::info!(
            samples = samples.len(),
            rejected = rejected.len(),
            timestamps = aggregated.len(),
            keyframes = keyframes.len(),
            "pipeline complete"
        );

        Ok(RaceOutput {
            max_rank: self.config.max_rank,
            sample_count: samples.len(),
            rejected,
            aggregated,
            keyframes,
            frame_index,
        })
    }
}
