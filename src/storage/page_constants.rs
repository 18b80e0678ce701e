//! Record size limits shared by every page kind

/// Record size used when the caller has no preference
pub const DEFAULT_RECORD_SIZE: usize = 4096;

/// Largest record a page can address - row offsets are 16-bit
pub const MAX_RECORD_SIZE: usize = u16::MAX as usize;

/// Record identifier - the record's position in its storage file
pub type RecordId = u64;

/// Width of the CRC32 trailer written after each persisted record
pub const CHECKSUM_SIZE: usize = 4;
