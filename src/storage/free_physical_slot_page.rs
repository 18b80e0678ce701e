//! Free physical slot page - a table of free byte ranges and their sizes
//!
//! # Page Layout
//!
//! ```text
//! +---------------------------+
//! | page tag        (u16)     |  offset 0
//! | in-use rows     (u16)     |  offset 2
//! +---------------------------+
//! | row 0                     |  offset 4
//! |   record id     (u32)     |
//! |   byte offset   (u16)     |
//! |   size          (u32)     |
//! | row 1                     |
//! |   ...                     |
//! +---------------------------+
//! ```
//!
//! A row whose size is 0 is vacant; a tracked free slot is never empty.
//! The header count always equals the number of rows with a non-zero size.
//!
//! Sizes are cached in memory the first time a row is read. The page owns
//! its record and hands out no mutable access to it, so every size write
//! goes through [`FreePhysicalSlotPage`] and updates the record, the cache
//! and the count together.

use crate::common::error::{Error, Result};
use crate::storage::location::{pack_location, LOCATION_SIZE};
use crate::storage::page_constants::MAX_RECORD_SIZE;
use crate::storage::page_header::{check_page_type, write_page_header, PAGE_HEADER_SIZE};
use crate::storage::page_type::PageType;
use crate::storage::record::Record;
use crate::storage::slot_info::{write_location, SlotInfo};
use crate::{freeslot_debug, freeslot_trace, freeslot_warn};

/// Offset of the in-use row count
#[allow(clippy::cast_possible_truncation)]
pub const OFFSET_COUNT: u16 = PAGE_HEADER_SIZE as u16;

/// Offset of the first row
pub const OFFSET_DATA: u16 = OFFSET_COUNT + 2;

/// Width of the size field of a row
pub const SIZE_INFO_SIZE: usize = 4;

/// Width of one row: location followed by size
#[allow(clippy::cast_possible_truncation)]
pub const SLOT_INFO_SIZE: u16 = (LOCATION_SIZE + SIZE_INFO_SIZE) as u16;

/// A slot wasting less than this many bytes is taken without looking further
pub const OPTIMAL_WASTE_MARGIN: u32 = 128;

/// Largest waste a caller can record - it keeps the difference between the
/// available and the used size of a physical slot in an unsigned 16-bit field
pub const MAX_AVAILABLE_SIZE_DIFFERENCE: u32 = 0xFFFF;

/// Placeholder location written into a freshly claimed row
const PLACEHOLDER_RECORD: u32 = 1;
const PLACEHOLDER_OFFSET: u16 = 1;

/// Placeholder size written into a freshly claimed row
const PLACEHOLDER_SIZE: u32 = 1;

/// Record length needed for a page with `rows` rows
pub fn record_size_for_rows(rows: u16) -> usize {
    usize::from(OFFSET_DATA) + usize::from(rows) * usize::from(SLOT_INFO_SIZE)
}

/// Outcome of [`FreePhysicalSlotPage::find_slot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSearch {
    /// Row tracking a free slot that satisfies the request
    Found(u16),
    /// Nothing on this page fits acceptably; carries the largest tracked
    /// size, 0 if the page tracks nothing
    Exhausted(u32),
}

impl SlotSearch {
    /// Row of a successful search
    pub fn row(self) -> Option<u16> {
        match self {
            SlotSearch::Found(row) => Some(row),
            SlotSearch::Exhausted(_) => None,
        }
    }

    /// Check if the search found a row
    pub fn is_found(self) -> bool {
        matches!(self, SlotSearch::Found(_))
    }

    /// Largest free slot on the page, when the search came up empty
    pub fn largest_available(self) -> Option<u32> {
        match self {
            SlotSearch::Found(_) => None,
            SlotSearch::Exhausted(size) => Some(size),
        }
    }

    /// Signed encoding: the row index, or the negated largest size
    ///
    /// `Exhausted(0)` and `Found(0)` both map to 0 here.
    pub fn as_signed(self) -> i64 {
        match self {
            SlotSearch::Found(row) => i64::from(row),
            SlotSearch::Exhausted(size) => -i64::from(size),
        }
    }
}

/// Free physical slot page
#[derive(Debug)]
pub struct FreePhysicalSlotPage {
    record: Record,
    max_slots: u16,
    max_acceptable_waste: u32,
    /// Row sizes; `None` until the row is first read
    size_cache: Vec<Option<u32>>,
}

impl SlotInfo for FreePhysicalSlotPage {
    const OFFSET_DATA: u16 = OFFSET_DATA;
    const SLOT_INFO_SIZE: u16 = SLOT_INFO_SIZE;

    fn record(&self) -> &Record {
        &self.record
    }

    fn set_slot_info(&mut self, offset: u16, slot_record: u32, slot_offset: u16) {
        write_location(&mut self.record, offset, slot_record, slot_offset);
    }
}

impl FreePhysicalSlotPage {
    /// Wrap a record that already carries the free physical slot page tag
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPageType` or `Error::UnexpectedPageType` if
    /// the tag is wrong and `Error::InvalidInput` if the record length is
    /// outside `OFFSET_DATA..=MAX_RECORD_SIZE`.
    pub fn new(record: Record) -> Result<Self> {
        if let Err(err) = check_page_type(&record, PageType::FreePhysicalSlot) {
            freeslot_warn!(
                "Record {} is not a free physical slot page: {}",
                record.id(),
                err
            );
            return Err(err);
        }
        Self::check_length(&record)?;

        let len = record.data_length();
        let max_slots = (len - usize::from(OFFSET_DATA)) / usize::from(SLOT_INFO_SIZE);

        // len <= MAX_RECORD_SIZE, both values fit
        #[allow(clippy::cast_possible_truncation)]
        let (max_slots, max_acceptable_waste) = (max_slots as u16, (len / 4) as u32);

        freeslot_trace!(
            "Opened free physical slot page on record {} with {} rows",
            record.id(),
            max_slots
        );

        Ok(Self {
            record,
            max_slots,
            max_acceptable_waste,
            size_cache: vec![None; usize::from(max_slots)],
        })
    }

    /// Format a record as an empty free physical slot page and wrap it
    ///
    /// Any previous content of the record is discarded.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the record length is outside
    /// `OFFSET_DATA..=MAX_RECORD_SIZE`.
    pub fn init(mut record: Record) -> Result<Self> {
        Self::check_length(&record)?;

        record.clear();
        write_page_header(&mut record, PageType::FreePhysicalSlot);
        record.write_u16(usize::from(OFFSET_COUNT), 0);

        Self::new(record)
    }

    fn check_length(record: &Record) -> Result<()> {
        let len = record.data_length();
        if len < usize::from(OFFSET_DATA) || len > MAX_RECORD_SIZE {
            freeslot_warn!(
                "Record {} has unusable length {} for a free physical slot page",
                record.id(),
                len
            );
            return Err(Error::invalid_input(format!(
                "Record length {len} outside {OFFSET_DATA}..={MAX_RECORD_SIZE}"
            )));
        }
        Ok(())
    }

    /// Hand back the record, dropping the size cache
    pub fn into_record(self) -> Record {
        self.record
    }

    /// Maximum number of rows on this page
    pub fn max_slots(&self) -> u16 {
        self.max_slots
    }

    /// Largest waste `find_slot` tolerates for a row outside the optimal margin
    pub fn max_acceptable_waste(&self) -> u32 {
        self.max_acceptable_waste
    }

    /// Number of rows currently tracking a free slot
    pub fn free_slot_count(&self) -> u16 {
        self.record.read_u16(usize::from(OFFSET_COUNT))
    }

    /// Packed location stored in a row
    ///
    /// # Errors
    ///
    /// Returns `Error::SlotOutOfRange` if `row >= max_slots()`.
    pub fn slot_info_location(&self, row: u16) -> Result<u64> {
        let offset = self.row_offset(row)?;
        Ok(pack_location(
            self.slot_info_record(offset),
            self.slot_info_offset(offset),
        ))
    }

    /// Size stored in the row at `offset`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRowOffset` if `offset` is not the start of a row.
    pub fn free_slot_size(&mut self, offset: u16) -> Result<u32> {
        let row = self.offset_row(offset)?;
        Ok(self.row_size(row))
    }

    /// Store a size in the row at `offset`
    ///
    /// A write that turns a vacant row into an in-use one, or the other way
    /// round, moves the row count with it. The location is left as it is;
    /// use [`release_slot_info`](Self::release_slot_info) to clear a row.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRowOffset` if `offset` is not the start of a
    /// row and `Error::Corruption` if the count cannot follow the write.
    pub fn set_free_slot_size(&mut self, offset: u16, size: u32) -> Result<()> {
        let row = self.offset_row(offset)?;
        let count = match (self.row_size(row) != 0, size != 0) {
            (false, true) => Some(self.incremented_count(row)?),
            (true, false) => Some(self.decremented_count(row)?),
            _ => None,
        };

        self.write_row_size(row, size);
        if let Some(count) = count {
            self.write_count(count);
            freeslot_trace!(
                "Size write on row {} of record {} left {} in use",
                row,
                self.record.id(),
                count
            );
        }
        Ok(())
    }

    /// Claim a vacant row and return its offset
    ///
    /// The row gets a placeholder size of 1 and a placeholder location until
    /// the caller stores the real ones. Pick the row with
    /// [`first_free_slot_info`](Self::first_free_slot_info); both calls must
    /// happen under the same writer.
    ///
    /// # Errors
    ///
    /// Returns `Error::SlotOutOfRange` for a row past the capacity,
    /// `Error::SlotInUse` if the row is already claimed and
    /// `Error::Corruption` if the stored count is already at capacity.
    pub fn allocate_slot_info(&mut self, row: u16) -> Result<u16> {
        let offset = self.row_offset(row)?;
        if self.row_size(row) != 0 {
            return Err(Error::SlotInUse(row));
        }

        let count = self.incremented_count(row)?;

        self.write_row_size(row, PLACEHOLDER_SIZE);
        self.set_slot_info(offset, PLACEHOLDER_RECORD, PLACEHOLDER_OFFSET);
        self.write_count(count);

        freeslot_debug!(
            "Claimed row {} on record {} ({} in use)",
            row,
            self.record.id(),
            count
        );
        Ok(offset)
    }

    /// Give a row up and return its offset
    ///
    /// # Errors
    ///
    /// Returns `Error::SlotOutOfRange` for a row past the capacity,
    /// `Error::SlotVacant` if the row is not claimed and
    /// `Error::Corruption` if the stored count is already 0.
    pub fn release_slot_info(&mut self, row: u16) -> Result<u16> {
        let offset = self.row_offset(row)?;
        if self.row_size(row) == 0 {
            return Err(Error::SlotVacant(row));
        }

        let count = self.decremented_count(row)?;

        self.write_row_size(row, 0);
        self.set_slot_info(offset, 0, 0);
        self.write_count(count);

        freeslot_debug!(
            "Released row {} on record {} ({} in use)",
            row,
            self.record.id(),
            count
        );
        Ok(offset)
    }

    /// First vacant row, or `None` if every row is in use
    pub fn first_free_slot_info(&mut self) -> Option<u16> {
        (0..self.max_slots).find(|&row| self.row_size(row) == 0)
    }

    /// Check if a row is tracking a free slot
    ///
    /// # Errors
    ///
    /// Returns `Error::SlotOutOfRange` if `row >= max_slots()`.
    pub fn is_allocated_slot(&mut self, row: u16) -> Result<bool> {
        self.row_offset(row)?;
        Ok(self.row_size(row) != 0)
    }

    /// Find a row tracking at least `min_size` bytes without wasting too much
    ///
    /// The first row wasting less than [`OPTIMAL_WASTE_MARGIN`] bytes is
    /// returned straight away. Otherwise the row with the least waste wins,
    /// provided its waste stays below both a quarter of the record length
    /// and [`MAX_AVAILABLE_SIZE_DIFFERENCE`]; ties go to the lower row.
    /// Failing that, the search reports the largest size on the page so the
    /// caller can decide whether to try elsewhere.
    pub fn find_slot(&mut self, min_size: u32) -> SlotSearch {
        let mut best: Option<(u16, u32)> = None;
        let mut max_size = 0;

        for row in 0..self.max_slots {
            let size = self.row_size(row);
            max_size = max_size.max(size);

            if size == 0 || size < min_size {
                continue;
            }

            let waste = size - min_size;
            if waste < OPTIMAL_WASTE_MARGIN {
                return SlotSearch::Found(row);
            }

            if best.map_or(true, |(_, best_waste)| waste < best_waste) {
                best = Some((row, waste));
            }
        }

        if let Some((row, waste)) = best {
            if waste < self.max_acceptable_waste && waste < MAX_AVAILABLE_SIZE_DIFFERENCE {
                return SlotSearch::Found(row);
            }
        }

        freeslot_debug!(
            "No row on record {} fits {} bytes (largest: {})",
            self.record.id(),
            min_size,
            max_size
        );
        SlotSearch::Exhausted(max_size)
    }

    /// Count after `row` goes from vacant to in use
    fn incremented_count(&self, row: u16) -> Result<u16> {
        let count = self.free_slot_count();
        if count >= self.max_slots {
            return Err(Error::corruption(format!(
                "Row count {count} of record {} already at capacity {} with row {row} vacant",
                self.record.id(),
                self.max_slots
            )));
        }
        Ok(count + 1)
    }

    /// Count after `row` goes from in use to vacant
    fn decremented_count(&self, row: u16) -> Result<u16> {
        self.free_slot_count().checked_sub(1).ok_or_else(|| {
            Error::corruption(format!(
                "Row count of record {} is 0 with row {row} in use",
                self.record.id()
            ))
        })
    }

    fn write_count(&mut self, count: u16) {
        self.record.write_u16(usize::from(OFFSET_COUNT), count);
    }

    fn row_offset(&self, row: u16) -> Result<u16> {
        if row >= self.max_slots {
            return Err(Error::SlotOutOfRange {
                row,
                max: self.max_slots,
            });
        }
        Ok(Self::slot_info_to_offset(row))
    }

    fn offset_row(&self, offset: u16) -> Result<u16> {
        let relative = offset
            .checked_sub(OFFSET_DATA)
            .ok_or(Error::InvalidRowOffset(offset))?;
        if relative % SLOT_INFO_SIZE != 0 || relative / SLOT_INFO_SIZE >= self.max_slots {
            return Err(Error::InvalidRowOffset(offset));
        }
        Ok(Self::offset_to_slot_info(offset))
    }

    fn row_size(&mut self, row: u16) -> u32 {
        let index = usize::from(row);
        if let Some(size) = self.size_cache[index] {
            return size;
        }

        let offset = usize::from(Self::slot_info_to_offset(row)) + LOCATION_SIZE;
        let size = self.record.read_u32(offset);
        freeslot_trace!("Cached size {} for row {} on record {}", size, row, self.record.id());
        self.size_cache[index] = Some(size);
        size
    }

    fn write_row_size(&mut self, row: u16, size: u32) {
        let offset = usize::from(Self::slot_info_to_offset(row)) + LOCATION_SIZE;
        self.record.write_u32(offset, size);
        self.size_cache[usize::from(row)] = Some(size);
    }
}
