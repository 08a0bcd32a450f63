use ar_core::CoreError;
use ar_dataset::DatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Nothing to rank: no entities, or no sample survived.  Fatal for the run.
    #[error("empty dataset: {0}")]
    EmptyDataset(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl PipelineError {
    /// `true` for the errors that only discard one entity period.
    pub fn is_scoped(&self) -> bool {
        matches!(
            self,
            PipelineError::Core(CoreError::IndexOutOfRange { .. })
                | PipelineError::Dataset(DatasetError::MalformedPeriod { .. })
        )
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
