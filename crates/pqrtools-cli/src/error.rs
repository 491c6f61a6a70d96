use pqrtools::core::io::pqr::PqrError;
use pqrtools::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

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

impl From<PqrError> for CliError {
    fn from(e: PqrError) -> Self {
        CliError::Core(EngineError::Pqr(e))
    }
}

impl CliError {
    /// Failures of the file operations themselves (missing input, I/O, malformed
    /// records). These are reported without failing the process.
    pub fn is_operation_failure(&self) -> bool {
        matches!(self, CliError::Core(_) | CliError::Io(_))
    }
}
