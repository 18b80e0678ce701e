//! Record - a fixed-size byte buffer with typed big-endian field access
//!
//! Every page kind is a view over one record. The record only knows its id,
//! its bytes and whether they changed since the last flush; layout is the
//! business of the page that wraps it.

use crate::storage::page_constants::RecordId;
use byteorder::{BigEndian, ByteOrder};

/// Fixed-size storage record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    data: Box<[u8]>,
    dirty: bool,
}

impl Record {
    /// Create a zero-filled record of `size` bytes
    pub fn new(id: RecordId, size: usize) -> Self {
        Self {
            id,
            data: vec![0; size].into_boxed_slice(),
            dirty: false,
        }
    }

    /// Wrap existing bytes, e.g. freshly read from a file
    pub fn from_bytes(id: RecordId, bytes: Vec<u8>) -> Self {
        Self {
            id,
            data: bytes.into_boxed_slice(),
            dirty: false,
        }
    }

    /// Record id
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Raw record bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of the record in bytes
    pub fn data_length(&self) -> usize {
        self.data.len()
    }

    /// Read a 16-bit value
    ///
    /// # Panics
    ///
    /// Panics if `offset + 2` exceeds the record length.
    pub fn read_u16(&self, offset: usize) -> u16 {
        BigEndian::read_u16(&self.data[offset..offset + 2])
    }

    /// Write a 16-bit value
    ///
    /// # Panics
    ///
    /// Panics if `offset + 2` exceeds the record length.
    pub fn write_u16(&mut self, offset: usize, value: u16) {
        BigEndian::write_u16(&mut self.data[offset..offset + 2], value);
        self.dirty = true;
    }

    /// Read a 32-bit value
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4` exceeds the record length.
    pub fn read_u32(&self, offset: usize) -> u32 {
        BigEndian::read_u32(&self.data[offset..offset + 4])
    }

    /// Write a 32-bit value
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4` exceeds the record length.
    pub fn write_u32(&mut self, offset: usize, value: u32) {
        BigEndian::write_u32(&mut self.data[offset..offset + 4], value);
        self.dirty = true;
    }

    /// Zero every byte of the record
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.dirty = true;
    }

    /// Whether the record changed since it was created or last flushed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the record as clean, typically after a flush
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// CRC32 of the record bytes
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.data);
        hasher.finalize()
    }
}
