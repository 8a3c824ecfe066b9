#![allow(dead_code)]

use binrw::BinWriterExt;
use ne_extract::{NeHeader, ResourceBlock, TypeBlock};
use std::io::{Cursor, Seek, SeekFrom, Write};

pub const EXT_HEADER_OFFSET: u64 = 0x40;
/// The resource table starts right after the NE header.
pub const TABLE_START: u64 = EXT_HEADER_OFFSET + NeHeader::SIZE;

/// Builds a resource table byte by byte; offsets are relative to its start.
#[derive(Default)]
pub struct TableBytes {
    pub bytes: Vec<u8>,
}

impl TableBytes {
    pub fn new(offset_shift: u16) -> Self {
        Self { bytes: offset_shift.to_le_bytes().to_vec() }
    }

    pub fn type_block(mut self, type_id: u16, count: u16) -> Self {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&TypeBlock { type_id, count }).unwrap();
        self.bytes.extend(cursor.into_inner());
        self
    }

    pub fn resource(mut self, offset: u16, length: u16, flags: u16, id: u16) -> Self {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&ResourceBlock { offset, length, flags, id }).unwrap();
        self.bytes.extend(cursor.into_inner());
        self
    }

    pub fn terminator(self) -> Self {
        self.type_block(0, 0)
    }

    pub fn counted(mut self, s: &str) -> Self {
        self.bytes.push(s.len() as u8);
        self.bytes.extend_from_slice(s.as_bytes());
        self
    }

    pub fn len(&self) -> u16 {
        self.bytes.len() as u16
    }
}

/// Lays out an MZ stub, an NE header and `table`. `max_bytes` sets where the
/// resident name table starts relative to the resource table.
pub fn build_image(table: &TableBytes, alignment_shift: u16, max_bytes: u16) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    cursor.write_all(b"MZ").unwrap();
    cursor.seek(SeekFrom::Start(0x3C)).unwrap();
    cursor.write_all(&(EXT_HEADER_OFFSET as u32).to_le_bytes()).unwrap();

    let header = NeHeader {
        signature: *b"NE",
        resource_table_offset: NeHeader::SIZE as u16,
        resident_name_table_offset: NeHeader::SIZE as u16 + max_bytes,
        alignment_shift,
        resource_entry_count: 1,
        ..NeHeader::default()
    };
    cursor.seek(SeekFrom::Start(EXT_HEADER_OFFSET)).unwrap();
    header.write(&mut cursor).unwrap();
    cursor.write_all(&table.bytes).unwrap();
    cursor.into_inner()
}

/// Writes `data` at `offset`, growing the image as needed.
pub fn place(image: &mut Vec<u8>, offset: usize, data: &[u8]) {
    if image.len() < offset + data.len() {
        image.resize(offset + data.len(), 0);
    }
    image[offset..offset + data.len()].copy_from_slice(data);
}
