use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CLIError {
    #[error("IO Error: {0}")]
    IOError(#[from] io::Error),
}
