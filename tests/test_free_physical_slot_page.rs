//! Tests for the free physical slot page

use freeslot::common::test_utils::{init_test_logging, page_with_sizes};
use freeslot::storage::free_physical_slot_page::*;
use freeslot::storage::page_header::write_page_header;
use freeslot::storage::page_type::PageType;
use freeslot::storage::slot_info::SlotInfo;
use freeslot::{Error, Record};
use pretty_assertions::assert_eq;

fn row_sizes(page: &mut FreePhysicalSlotPage) -> Vec<u32> {
    (0..page.max_slots())
        .map(|row| {
            let offset = FreePhysicalSlotPage::slot_info_to_offset(row);
            page.free_slot_size(offset).unwrap()
        })
        .collect()
}

#[test]
fn test_fresh_page_has_no_rows_in_use() {
    init_test_logging();

    for size in [record_size_for_rows(1), 512, 4096, 65535] {
        let mut page = FreePhysicalSlotPage::init(Record::new(0, size)).unwrap();
        assert_eq!(page.free_slot_count(), 0);
        assert!(row_sizes(&mut page).iter().all(|&s| s == 0));
    }
}

#[test]
fn test_claim_increments_count_and_sets_placeholder() {
    let mut page = FreePhysicalSlotPage::init(Record::new(0, record_size_for_rows(6))).unwrap();

    for (expected, row) in (1u16..).zip([4, 0, 5]) {
        let offset = page.allocate_slot_info(row).unwrap();
        assert_eq!(page.free_slot_count(), expected);
        assert_eq!(page.free_slot_size(offset).unwrap(), 1);
    }
    assert_eq!(row_sizes(&mut page), vec![1, 0, 0, 0, 1, 1]);
}

#[test]
fn test_claim_then_release_restores_state() {
    let mut page = page_with_sizes(0, &[10, 0, 30]).unwrap();
    let before = page.free_slot_count();

    page.allocate_slot_info(1).unwrap();
    page.release_slot_info(1).unwrap();

    assert_eq!(page.free_slot_count(), before);
    assert_eq!(row_sizes(&mut page), vec![10, 0, 30]);
}

#[test]
fn test_size_round_trip_extremes() {
    let mut page = page_with_sizes(0, &[1, 1]).unwrap();
    let offset = FreePhysicalSlotPage::slot_info_to_offset(1);

    for size in [0, 1, 127, 128, 65_535, 65_536, u32::MAX - 1, u32::MAX] {
        page.set_free_slot_size(offset, size).unwrap();
        assert_eq!(page.free_slot_size(offset).unwrap(), size);
        assert_eq!(page.free_slot_size(offset).unwrap(), size);
        assert_eq!(page.free_slot_count(), if size == 0 { 1 } else { 2 });
    }
}

#[test]
fn test_size_writes_keep_count_in_step() {
    let mut page = FreePhysicalSlotPage::init(Record::new(0, record_size_for_rows(3))).unwrap();
    let first = page.allocate_slot_info(0).unwrap();

    // Zeroing a claimed row gives it up
    page.set_free_slot_size(first, 0).unwrap();
    assert_eq!(page.free_slot_count(), 0);
    assert_eq!(page.release_slot_info(0), Err(Error::SlotVacant(0)));

    // Sizing a vacant row takes it
    let second = FreePhysicalSlotPage::slot_info_to_offset(1);
    page.set_free_slot_size(second, 99).unwrap();
    assert_eq!(page.free_slot_count(), 1);
    assert_eq!(page.first_free_slot_info(), Some(0));
    assert_eq!(page.find_slot(90), SlotSearch::Found(1));

    page.release_slot_info(1).unwrap();
    assert_eq!(page.free_slot_count(), 0);
    assert_eq!(row_sizes(&mut page), vec![0, 0, 0]);
}

#[test]
fn test_reopened_page_matches_record_bytes() {
    let mut page = page_with_sizes(0, &[500, 0]).unwrap();
    let offset = FreePhysicalSlotPage::slot_info_to_offset(0);
    page.set_free_slot_size(offset, 7).unwrap();

    // What find_slot sees is what the record holds
    assert_eq!(page.find_slot(400), SlotSearch::Exhausted(7));
    let mut reopened = FreePhysicalSlotPage::new(page.into_record()).unwrap();
    assert_eq!(reopened.free_slot_size(offset).unwrap(), 7);
    assert_eq!(reopened.find_slot(400), SlotSearch::Exhausted(7));
}

#[test]
fn test_scenario_first_fit_within_margin() {
    let mut page = page_with_sizes(0, &[0, 500, 50, 200]).unwrap();
    assert_eq!(page.max_slots(), 4);

    assert_eq!(page.find_slot(40), SlotSearch::Found(2));
    // Repeated searches come from the cache and agree
    assert_eq!(page.find_slot(40), SlotSearch::Found(2));
}

#[test]
fn test_scenario_exhausted() {
    let mut page = page_with_sizes(0, &[0, 500, 50, 200]).unwrap();

    let result = page.find_slot(600);
    assert_eq!(result, SlotSearch::Exhausted(500));
    assert_eq!(result.largest_available(), Some(500));
    assert_eq!(result.as_signed(), -500);
}

#[test]
fn test_margin_boundary() {
    let mut page = FreePhysicalSlotPage::init(Record::new(0, 4096)).unwrap();
    let offset = page.allocate_slot_info(0).unwrap();
    page.set_free_slot_size(offset, 1000 + OPTIMAL_WASTE_MARGIN).unwrap();
    let offset = page.allocate_slot_info(1).unwrap();
    page.set_free_slot_size(offset, 1000 + OPTIMAL_WASTE_MARGIN - 1).unwrap();

    // Row 0 wastes exactly the margin, so the scan goes on to row 1
    assert_eq!(page.find_slot(1000), SlotSearch::Found(1));
}

#[test]
fn test_acceptable_waste_boundary() {
    // 4096 / 4 = 1024: a waste of 1023 is accepted, 1024 is not
    let mut page = FreePhysicalSlotPage::init(Record::new(0, 4096)).unwrap();
    let offset = page.allocate_slot_info(0).unwrap();
    page.set_free_slot_size(offset, 1123).unwrap();

    assert_eq!(page.max_acceptable_waste(), 1024);
    assert_eq!(page.find_slot(100), SlotSearch::Found(0));
    assert_eq!(page.find_slot(99), SlotSearch::Exhausted(1123));
}

#[test]
fn test_location_fields() {
    let mut page = FreePhysicalSlotPage::init(Record::new(0, 128)).unwrap();
    let offset = page.allocate_slot_info(3).unwrap();
    page.set_slot_info(offset, 0x00AB_CDEF, 0x0102);

    assert_eq!(page.slot_info_record(offset), 0x00AB_CDEF);
    assert_eq!(page.slot_info_offset(offset), 0x0102);
    assert_eq!(page.slot_info_location(3).unwrap(), 0x00AB_CDEF_0102);
}

#[test]
fn test_contract_violations_leave_count_alone() {
    let mut page = page_with_sizes(0, &[0, 7]).unwrap();

    let err = page.allocate_slot_info(1).unwrap_err();
    assert_eq!(err, Error::SlotInUse(1));
    assert!(err.is_contract_violation());

    let err = page.release_slot_info(0).unwrap_err();
    assert_eq!(err, Error::SlotVacant(0));

    assert_eq!(page.free_slot_count(), 1);
}

#[test]
fn test_wrong_page_kind_is_fatal() {
    let mut record = Record::new(0, 64);
    write_page_header(&mut record, PageType::FreeLogicalSlot);

    let err = FreePhysicalSlotPage::new(record).unwrap_err();
    assert!(!err.is_recoverable());
}
