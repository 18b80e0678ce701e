//! Page type enumeration for the page kinds that share the record format

use crate::common::error::Error;

/// Base value of every page tag; the page type is added to it
pub const VIEW_PAGE_HEADER: u16 = 0x1990;

/// Page type - stored as `VIEW_PAGE_HEADER + type` in the first two bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PageType {
    /// Data page - stores physical slots
    Data = 0x01,
    /// Free logical slot page - tracks unused logical slot ids
    FreeLogicalSlot = 0x02,
    /// Free physical slot page - tracks unused byte ranges and their sizes
    FreePhysicalSlot = 0x03,
}

impl PageType {
    /// The tag written at the start of a page of this type
    pub const fn magic(self) -> u16 {
        VIEW_PAGE_HEADER + self as u16
    }
}

impl TryFrom<u16> for PageType {
    type Error = Error;

    /// Decode a page tag (not the bare type number)
    fn try_from(magic: u16) -> Result<Self, Self::Error> {
        match magic.wrapping_sub(VIEW_PAGE_HEADER) {
            0x01 => Ok(PageType::Data),
            0x02 => Ok(PageType::FreeLogicalSlot),
            0x03 => Ok(PageType::FreePhysicalSlot),
            _ => Err(Error::InvalidPageType(magic)),
        }
    }
}
