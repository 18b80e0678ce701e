//! Error handling for freeslot

use crate::storage::page_type::PageType;
use thiserror::Error;

/// Common result type for freeslot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for free slot bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(String),
    /// Stored data is inconsistent with itself
    #[error("Storage corruption: {0}")]
    Corruption(String),
    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Page tag does not name any known page type
    #[error("Invalid page type tag: 0x{0:04x}")]
    InvalidPageType(u16),
    /// Page tag names a different page type than the one requested
    #[error("Unexpected page type: expected {expected:?}, found tag 0x{found:04x}")]
    UnexpectedPageType {
        /// Page type the caller asked for
        expected: PageType,
        /// Raw tag found at the start of the record
        found: u16,
    },
    /// Row index past the page capacity
    #[error("Slot row {row} out of range (max slots: {max})")]
    SlotOutOfRange {
        /// Requested row
        row: u16,
        /// Capacity of the page
        max: u16,
    },
    /// Byte offset does not address the start of a row
    #[error("Offset {0} does not address a slot row")]
    InvalidRowOffset(u16),
    /// Claim of a row that already tracks a free slot
    #[error("Slot row {0} is already in use")]
    SlotInUse(u16),
    /// Release of a row that tracks nothing
    #[error("Slot row {0} is already vacant")]
    SlotVacant(u16),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(msg: S) -> Self {
        Error::Io(msg.into())
    }

    /// Create a corruption error
    pub fn corruption<S: Into<String>>(msg: S) -> Self {
        Error::Corruption(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this is a corruption error
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Corruption(_))
    }

    /// Check if the caller broke the vacant/in-use row contract
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::SlotInUse(_) | Error::SlotVacant(_))
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io(_)
            | Error::InvalidInput(_)
            | Error::SlotOutOfRange { .. }
            | Error::InvalidRowOffset(_)
            | Error::SlotInUse(_)
            | Error::SlotVacant(_) => true,
            Error::Corruption(_)
            | Error::InvalidPageType(_)
            | Error::UnexpectedPageType { .. } => false,
        }
    }
}
