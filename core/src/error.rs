use thiserror::Error;

use crate::CardId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScratchError {
    #[error("2D drawing context is unavailable")]
    ContextUnavailable,
    #[error("Pixel readback failed: {0}")]
    Readback(String),
    #[error("Surface has not been allocated yet")]
    NotAllocated,
    #[error("Storage is unavailable")]
    StorageUnavailable,
    #[error("Storage write failed: {0}")]
    StorageWrite(String),
    #[error("Stored value is malformed: {0}")]
    MalformedValue(String),
    #[error("Please enter a number")]
    NotANumber,
    #[error("Please enter a number between {min} and {max}")]
    GuessOutOfRange { min: u8, max: u8 },
    #[error("Unknown card: {0}")]
    UnknownCard(CardId),
    #[error("Card listed twice: {0}")]
    DuplicateCard(CardId),
    #[error("Catalog has no bottles")]
    EmptyCatalog,
}

pub type Result<T> = core::result::Result<T, ScratchError>;
