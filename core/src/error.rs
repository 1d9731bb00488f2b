use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Invalid month: {year}-{month0} (month index must be 0..=11)")]
    InvalidMonth { year: i32, month0: u32 },

    #[error("No day is selected for rating")]
    NoDaySelected,

    /// The new rating is already in memory; only the write failed.
    #[error("Failed to save ratings: {0}")]
    PersistenceWrite(#[source] anyhow::Error),
}

pub type ProgressResult<T> = Result<T, ProgressError>;
