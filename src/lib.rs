//! Freeslot - free physical slot bookkeeping for a page-based storage engine
//!
//! A free physical slot page is a fixed-size record that remembers where
//! unused byte ranges live elsewhere in a storage file and how large they
//! are, so an allocator can answer "give me N bytes" without scanning the
//! whole file.
//!
//! - [`storage::record`] is the fixed-size byte buffer every page lives in
//! - [`storage::free_physical_slot_page`] holds the row bookkeeping and the
//!   best-fit search
//! - [`storage::record_io`] persists records with a CRC32 trailer

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

// Core modules
pub mod common;
pub mod storage;

// Re-exports for convenience
pub use common::{Error, Result};
pub use storage::free_physical_slot_page::{FreePhysicalSlotPage, SlotSearch};
pub use storage::record::Record;

/// Version information
pub const VERSION_MAJOR: u32 = 0;
/// Version information
pub const VERSION_MINOR: u32 = 1;
/// Version information
pub const VERSION_PATCH: u32 = 0;
/// Version string
pub const VERSION: &str = "0.1.0";
