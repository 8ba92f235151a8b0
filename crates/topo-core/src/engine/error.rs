use crate::core::io::source::SourceError;
use crate::core::models::position::MalformedPositionError;
use crate::core::models::record::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read protein records: {source}")]
    Source {
        #[from]
        source: SourceError,
    },

    #[error("Row {row} rejected: {reason}")]
    RecordRejected { row: usize, reason: SkipReason },
}

/// Why a single input row was left out of the analysis.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Cysteine offset correction failed: {0}")]
    Offset(#[from] MalformedPositionError),
}

/// A row that was skipped, with enough context to locate it in the source table.
#[derive(Debug)]
pub struct SkippedRecord {
    /// One-based row number, not counting the header.
    pub row: usize,
    pub accession: Option<String>,
    pub reason: SkipReason,
}
