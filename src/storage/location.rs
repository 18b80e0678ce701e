//! Packed locations - a record id and a byte offset in one `u64`

/// Bytes a location occupies inside a slot row (u32 record + u16 offset)
pub const LOCATION_SIZE: usize = 6;

/// Pack a record id and an offset within that record
pub fn pack_location(record: u32, offset: u16) -> u64 {
    (u64::from(record) << 16) | u64::from(offset)
}

/// Record id part of a packed location
#[allow(clippy::cast_possible_truncation)]
pub fn location_record(location: u64) -> u32 {
    (location >> 16) as u32
}

/// Offset part of a packed location
#[allow(clippy::cast_possible_truncation)]
pub fn location_offset(location: u64) -> u16 {
    (location & 0xFFFF) as u16
}
