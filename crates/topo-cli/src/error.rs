use std::path::PathBuf;
use thiserror::Error;
use topoconflict::core::io::report::ReportError;
use topoconflict::core::io::source::SourceError;
use topoconflict::core::topology::parser::TopologyError;
use topoconflict::engine::error::EngineError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to open source table '{path}': {source}", path = path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    #[error("Failed to write output: {0}")]
    Report(#[from] ReportError),

    #[error("Invalid topology string: {0}")]
    Topology(#[from] TopologyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
