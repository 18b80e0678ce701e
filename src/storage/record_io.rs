//! Record I/O - reading and writing checksummed records to storage
//!
//! Records of one file all have the same length. Record `n` lives at frame
//! `n`; a frame is the record bytes followed by a big-endian CRC32 of them.

use crate::common::error::{Error, Result};
use crate::freeslot_error;
use crate::storage::page_constants::{RecordId, CHECKSUM_SIZE};
use crate::storage::record::Record;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/// Byte offset of the frame holding a record
pub fn record_file_offset(id: RecordId, record_size: usize) -> u64 {
    id * (record_size + CHECKSUM_SIZE) as u64
}

/// Write a record into its frame and mark it clean
///
/// # Errors
///
/// Returns an error if the seek or write fails.
pub fn write_record<W: Write + Seek>(out: &mut W, record: &mut Record) -> Result<()> {
    let offset = record_file_offset(record.id(), record.data_length());
    out.seek(SeekFrom::Start(offset))?;
    out.write_all(record.data())?;
    out.write_u32::<BigEndian>(record.checksum())?;
    record.clear_dirty();
    Ok(())
}

/// Write a record and sync the file to make it durable
///
/// # Errors
///
/// Returns an error if the write or sync operation fails.
pub fn write_record_sync(file: &mut File, record: &mut Record) -> Result<()> {
    write_record(file, record)?;
    file.sync_all()?;
    Ok(())
}

/// Read a record from its frame and verify its checksum
///
/// # Errors
///
/// Returns an error if the seek or read fails, and `Error::Corruption`
/// if the stored checksum does not match the record bytes.
pub fn read_record<R: Read + Seek>(input: &mut R, id: RecordId, record_size: usize) -> Result<Record> {
    let offset = record_file_offset(id, record_size);
    input.seek(SeekFrom::Start(offset))?;

    let mut data = vec![0; record_size];
    input.read_exact(&mut data)?;
    let stored = input.read_u32::<BigEndian>()?;

    let record = Record::from_bytes(id, data);
    let calculated = record.checksum();
    if stored != calculated {
        freeslot_error!(
            "Checksum mismatch for record {id} at offset {offset}: stored 0x{stored:08x}, calculated 0x{calculated:08x}"
        );
        return Err(Error::corruption(format!(
            "Checksum verification failed for record {id}"
        )));
    }

    Ok(record)
}
