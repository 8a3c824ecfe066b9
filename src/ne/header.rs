use std::io::{Read, Seek, SeekFrom};

use binrw::binrw;
use byteorder::{LittleEndian, ReadBytesExt};
use log::info;

use super::error::{NeError, Result};

pub const MZ_SIGNATURE: [u8; 2] = *b"MZ";
pub const NE_SIGNATURE: [u8; 2] = *b"NE";

// Location of the 32-bit pointer to the extended header inside the MZ stub.
pub const EXT_HEADER_POINTER: u64 = 0x3C;

// Alignment shift used when the header stores 0 (512-byte units).
pub const DEFAULT_ALIGNMENT_SHIFT: u16 = 9;

#[binrw]
#[derive(Debug, Default, Clone)]
#[brw(little)]
pub struct NeHeader {
    pub signature: [u8; 2],       // "NE"
    pub linker_major: u8,
    pub linker_minor: u8,
    pub entry_table_offset: u16,
    pub entry_table_length: u16,
    pub file_load_crc: u32,
    pub program_flags: u8,
    pub application_flags: u8,
    pub auto_data_segment: u16,
    pub initial_heap_size: u16,
    pub initial_stack_size: u16,
    pub entry_point: u32,         // CS:IP
    pub initial_stack: u32,       // SS:SP
    pub segment_count: u16,
    pub module_ref_count: u16,
    pub non_resident_names_size: u16,
    pub segment_table_offset: u16,
    pub resource_table_offset: u16,      // Relative to this header
    pub resident_name_table_offset: u16, // Relative to this header
    pub module_ref_table_offset: u16,
    pub imported_names_offset: u16,
    pub non_resident_names_offset: u32,  // Relative to start of file
    pub movable_entry_count: u16,
    pub alignment_shift: u16,            // 0 means 9
    pub resource_entry_count: u16,
    pub target_os: u8,
    pub os2_flags: u8,
    pub return_thunks_offset: u16,
    pub segment_ref_thunks_offset: u16,
    pub min_code_swap_size: u16,
    pub expected_windows_version: [u8; 2], // Minor first
}

impl NeHeader {
    pub const SIZE: u64 = 64;

    pub fn is_valid(&self) -> bool {
        self.signature == NE_SIGNATURE
    }

    pub fn read<R: Read + Seek>(reader: &mut R) -> std::result::Result<Self, binrw::Error> {
        use binrw::BinReaderExt;
        reader.read_le()
    }

    pub fn write<W: std::io::Write + Seek>(&self, writer: &mut W) -> std::result::Result<(), binrw::Error> {
        use binrw::BinWriterExt;
        writer.write_le(self)
    }

    pub fn size_shift(&self) -> u16 {
        match self.alignment_shift {
            0 => DEFAULT_ALIGNMENT_SHIFT,
            shift => shift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub ext_header_offset: u64,
    pub resource_table: u64,
    pub resident_names: u64,
    pub max_bytes: u64,
    pub size_shift: u16,
}

impl TableLayout {
    pub fn from_header(header: &NeHeader, ext_header_offset: u64) -> Result<Self> {
        let resource_table = u64::from(header.resource_table_offset) + ext_header_offset;
        let resident_names = u64::from(header.resident_name_table_offset) + ext_header_offset;
        let max_bytes = resident_names
            .checked_sub(resource_table)
            .ok_or(NeError::TableBounds {
                resource_table,
                resident_names,
            })?;

        Ok(Self {
            ext_header_offset,
            resource_table,
            resident_names,
            max_bytes,
            size_shift: header.size_shift(),
        })
    }

    // NE files without resources point both tables at the same offset.
    pub fn has_resource_table(&self) -> bool {
        self.max_bytes > 0
    }
}

pub fn locate_ne_header<R: Read + Seek>(reader: &mut R) -> Result<u64> {
    reader
        .seek(SeekFrom::Start(0))
        .map_err(NeError::seek("file type check", 0))?;

    let mut signature = [0u8; 2];
    reader
        .read_exact(&mut signature)
        .map_err(NeError::read("file type check"))?;
    if signature != MZ_SIGNATURE {
        return Err(NeError::BadSignature {
            what: "DOS stub",
            expected: "MZ",
            found: signature,
        });
    }

    reader
        .seek(SeekFrom::Start(EXT_HEADER_POINTER))
        .map_err(NeError::seek("extended header pointer", EXT_HEADER_POINTER))?;
    let offset = reader
        .read_u32::<LittleEndian>()
        .map_err(NeError::read("extended header pointer"))?;

    info!("Extended header offset: 0x{:08X}", offset);
    Ok(u64::from(offset))
}

pub fn read_ne_header<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<NeHeader> {
    reader
        .seek(SeekFrom::Start(offset))
        .map_err(NeError::seek("extended header", offset))?;
    let header = NeHeader::read(reader).map_err(NeError::decode("extended header"))?;

    if !header.is_valid() {
        return Err(NeError::BadSignature {
            what: "extended header",
            expected: "NE",
            found: header.signature,
        });
    }
    Ok(header)
}
