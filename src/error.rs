use thiserror::Error;

/// Failures of the interfaces layer (console IO, CSV output).
///
/// Gateway failures never reach this type: the engine stores them as slot
/// error strings, and one-shot mode reports the slot message directly.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
