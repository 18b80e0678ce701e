//! Page header - the 2-byte page tag at the beginning of each record

use crate::common::error::{Error, Result};
use crate::storage::page_type::PageType;
use crate::storage::record::Record;

/// Offset of the page tag
pub const OFFSET_MAGIC: usize = 0;

/// Header size in bytes; page-specific fields start here
pub const PAGE_HEADER_SIZE: usize = 2;

/// Stamp a record as a page of the given type
pub fn write_page_header(record: &mut Record, page_type: PageType) {
    record.write_u16(OFFSET_MAGIC, page_type.magic());
}

/// Read the raw page tag
pub fn read_magic(record: &Record) -> u16 {
    record.read_u16(OFFSET_MAGIC)
}

/// Decode the page type of a record
///
/// # Errors
///
/// Returns `Error::InvalidPageType` if the tag is not a known page type.
pub fn read_page_type(record: &Record) -> Result<PageType> {
    PageType::try_from(read_magic(record))
}

/// Verify a record carries the expected page tag
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the record cannot hold a header,
/// `Error::InvalidPageType` if the tag is unknown and
/// `Error::UnexpectedPageType` if it names another page type.
pub fn check_page_type(record: &Record, expected: PageType) -> Result<()> {
    if record.data_length() < PAGE_HEADER_SIZE {
        return Err(Error::invalid_input(format!(
            "Record {} is {} bytes, too short for a page header",
            record.id(),
            record.data_length()
        )));
    }

    match read_page_type(record)? {
        page_type if page_type == expected => Ok(()),
        _ => Err(Error::UnexpectedPageType {
            expected,
            found: read_magic(record),
        }),
    }
}
