//! Test utilities for freeslot

use crate::common::Result;
use crate::storage::free_physical_slot_page::{record_size_for_rows, FreePhysicalSlotPage};
use crate::storage::record::Record;
use std::sync::Once;

static TEST_LOGGER_INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_test_logging() {
    TEST_LOGGER_INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

/// Build a page with exactly one row per entry of `sizes`
///
/// A size of 0 leaves the row vacant; every other row is claimed and given
/// that size, with the row index as its location record.
///
/// # Errors
///
/// Returns an error if `sizes` has more rows than a record can hold.
pub fn page_with_sizes(record_id: u64, sizes: &[u32]) -> Result<FreePhysicalSlotPage> {
    let rows = u16::try_from(sizes.len())
        .map_err(|_| crate::Error::invalid_input(format!("{} rows", sizes.len())))?;
    let record = Record::new(record_id, record_size_for_rows(rows));
    fill_page(FreePhysicalSlotPage::init(record)?, sizes)
}

/// Claim and size rows of an existing page, as in [`page_with_sizes`]
///
/// # Errors
///
/// Returns an error if `sizes` is longer than the page or a row is taken.
pub fn fill_page(mut page: FreePhysicalSlotPage, sizes: &[u32]) -> Result<FreePhysicalSlotPage> {
    use crate::storage::slot_info::SlotInfo;

    for (row, &size) in (0u16..).zip(sizes) {
        if size == 0 {
            continue;
        }
        let offset = page.allocate_slot_info(row)?;
        page.set_slot_info(offset, u32::from(row), 0);
        page.set_free_slot_size(offset, size)?;
    }
    Ok(page)
}

/// Assert that two byte slices are equal with better error messages
///
/// # Panics
///
/// Panics if the byte slices differ in length or content.
pub fn assert_bytes_equal(actual: &[u8], expected: &[u8], context: &str) {
    assert!(
        actual.len() == expected.len(),
        "{context}: Length mismatch - actual: {}, expected: {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            a == e,
            "{context}: Byte mismatch at index {i}: actual 0x{a:02x}, expected 0x{e:02x}"
        );
    }
}
