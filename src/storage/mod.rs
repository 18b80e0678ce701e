//! Storage layer implementation

pub mod free_physical_slot_page;
pub mod location;
pub mod page_constants;
pub mod page_header;
pub mod page_type;
pub mod record;
pub mod record_io;
pub mod slot_info;
