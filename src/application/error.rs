use thiserror::Error;

use crate::domain::{LedgerError, PolicyError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidArgument(#[from] LedgerError),

    #[error(transparent)]
    InvalidPolicy(#[from] PolicyError),

    #[error("Income has not been set")]
    IncomeNotSet,

    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
