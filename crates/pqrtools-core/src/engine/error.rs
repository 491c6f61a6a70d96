use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pqr::PqrError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Pqr(#[from] PqrError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Pqr(PqrError::Io(e))
    }
}
