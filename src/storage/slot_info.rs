//! Slot info rows - location entries laid out in a fixed-stride row array
//!
//! A slot info page keeps an array of rows after its header. Every row
//! starts with a packed location:
//!
//! ```text
//! row offset  0: record id   (u32)
//! row offset  4: byte offset (u16)
//! row offset  6: page-specific payload
//! ```
//!
//! Implementors choose where the row array starts and how wide a row is;
//! the row/offset arithmetic and the location reads come for free. Writes
//! stay with the implementor, which owns any state derived from its rows,
//! and go through [`write_location`].

use crate::storage::location::LOCATION_SIZE;
use crate::storage::record::Record;

/// Offset of the record id within a row
const ROW_RECORD: u16 = 0;

/// Offset of the byte offset within a row
const ROW_OFFSET: u16 = 4;

/// Row storage shared by pages that track slot locations
pub trait SlotInfo {
    /// Offset of the first row
    const OFFSET_DATA: u16;

    /// Width of one row; at least `LOCATION_SIZE`
    const SLOT_INFO_SIZE: u16;

    /// Backing record
    fn record(&self) -> &Record;

    /// Store a location in the row at `offset`
    fn set_slot_info(&mut self, offset: u16, slot_record: u32, slot_offset: u16);

    /// Byte offset of a row
    ///
    /// # Panics
    ///
    /// Panics if the offset of `row` does not fit in a `u16`.
    fn slot_info_to_offset(row: u16) -> u16 {
        debug_assert!(usize::from(Self::SLOT_INFO_SIZE) >= LOCATION_SIZE);
        row.checked_mul(Self::SLOT_INFO_SIZE)
            .and_then(|relative| relative.checked_add(Self::OFFSET_DATA))
            .unwrap_or_else(|| panic!("Row {row} lies past the last addressable offset"))
    }

    /// Row addressed by a byte offset
    ///
    /// # Panics
    ///
    /// Panics if `offset` lies before the first row.
    fn offset_to_slot_info(offset: u16) -> u16 {
        offset
            .checked_sub(Self::OFFSET_DATA)
            .map(|relative| relative / Self::SLOT_INFO_SIZE)
            .unwrap_or_else(|| panic!("Offset {offset} lies before the first row"))
    }

    /// Record id of the location stored at `offset`
    fn slot_info_record(&self, offset: u16) -> u32 {
        self.record().read_u32(usize::from(offset + ROW_RECORD))
    }

    /// Byte offset of the location stored at `offset`
    fn slot_info_offset(&self, offset: u16) -> u16 {
        self.record().read_u16(usize::from(offset + ROW_OFFSET))
    }
}

/// Write a location into the row starting at `offset` of `record`
pub fn write_location(record: &mut Record, offset: u16, slot_record: u32, slot_offset: u16) {
    record.write_u32(usize::from(offset + ROW_RECORD), slot_record);
    record.write_u16(usize::from(offset + ROW_OFFSET), slot_offset);
}
