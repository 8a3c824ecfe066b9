pub mod error;
pub mod extract;
pub mod header;
pub mod scoped;
pub mod table;
pub mod types;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};

use error::{NeError, Result};
use header::{NeHeader, TableLayout};
use table::{ResourceBlock, ResourceEntry, ResourceKind, ResourceTable, TypeBlock, TypeEntry};

// Shift counts at or above this would push a 16-bit field past 32-bit file offsets.
const MAX_SHIFT: u16 = 32;

/// The walker restores the reader's position after every `visit_resource` call.
pub trait ResourceVisitor<R> {
    fn visit_type(&mut self, _kind: &ResourceKind, _type_index: usize, _count: u16) -> Result<()> {
        Ok(())
    }

    fn visit_resource(&mut self, _reader: &mut R, _kind: &ResourceKind, _entry: &ResourceEntry) -> Result<()> {
        Ok(())
    }
}

impl<R> ResourceVisitor<R> for () {}

impl<R, V: ResourceVisitor<R> + ?Sized> ResourceVisitor<R> for &mut V {
    fn visit_type(&mut self, kind: &ResourceKind, type_index: usize, count: u16) -> Result<()> {
        (**self).visit_type(kind, type_index, count)
    }

    fn visit_resource(&mut self, reader: &mut R, kind: &ResourceKind, entry: &ResourceEntry) -> Result<()> {
        (**self).visit_resource(reader, kind, entry)
    }
}

pub struct NeFile<R> {
    pub header: NeHeader,
    pub layout: TableLayout,
    reader: R,
}

impl NeFile<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(NeError::read("open input file"))?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> NeFile<R> {
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let ext_header_offset = header::locate_ne_header(&mut reader)?;
        let header = header::read_ne_header(&mut reader, ext_header_offset)?;
        let layout = TableLayout::from_header(&header, ext_header_offset)?;

        info!("Resource table offset: 0x{:04X}", layout.resource_table);
        info!("Resource table entries: {}", header.resource_entry_count);
        info!("Resident name table offset: 0x{:04X}", layout.resident_names);
        info!("Leaving {} maximum bytes in resource table", layout.max_bytes);

        Ok(Self {
            header,
            layout,
            reader,
        })
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn resources(&mut self) -> Result<ResourceTable> {
        self.walk(())
    }

    /// The first error from the file or the visitor stops the walk.
    pub fn walk<V: ResourceVisitor<R>>(&mut self, mut visitor: V) -> Result<ResourceTable> {
        let layout = self.layout;
        let mut found = ResourceTable {
            size_shift: layout.size_shift,
            ..ResourceTable::default()
        };

        if !layout.has_resource_table() {
            info!("No resource table present");
            return Ok(found);
        }
        check_shift("size alignment", layout.size_shift)?;

        let reader = &mut self.reader;
        reader
            .seek(SeekFrom::Start(layout.resource_table))
            .map_err(NeError::seek("resource table", layout.resource_table))?;

        let offset_shift = reader
            .read_u16::<LittleEndian>()
            .map_err(NeError::read("offset shift count"))?;
        check_shift("resource offset", offset_shift)?;
        found.offset_shift = offset_shift;
        info!("Size alignment shift count: 0x{:04X}", layout.size_shift);
        info!("Offset alignment shift count for resource data: 0x{:04X}", offset_shift);

        let mut consumed: u64 = 2;
        loop {
            if consumed >= layout.max_bytes {
                return Err(NeError::ResourceAreaOverflow {
                    consumed,
                    max_bytes: layout.max_bytes,
                });
            }

            let block = TypeBlock::read(reader).map_err(NeError::decode("type block"))?;
            if block.is_terminator() {
                debug!("End of type table after {} types", found.types.len());
                break;
            }
            consumed += TypeBlock::SIZE;

            let type_index = found.types.len();
            let kind = table::resolve_type(reader, block.type_id, layout.resource_table)?;
            visitor.visit_type(&kind, type_index, block.count)?;

            let mut resources = Vec::with_capacity(usize::from(block.count));
            for index in 0..usize::from(block.count) {
                let res = ResourceBlock::read(reader).map_err(NeError::decode("resource block"))?;
                consumed += ResourceBlock::SIZE;

                let entry = ResourceEntry {
                    type_index,
                    index,
                    flags: res.flags,
                    byte_offset: u64::from(res.offset) << offset_shift,
                    byte_length: u64::from(res.length) << layout.size_shift,
                    name: table::resolve_name(reader, res.id, layout.resource_table)?,
                };

                scoped::preserve_position(reader, |r| visitor.visit_resource(r, &kind, &entry))?;
                resources.push(entry);
            }

            found.types.push(TypeEntry {
                index: type_index,
                kind,
                resources,
            });
        }

        Ok(found)
    }
}

fn check_shift(what: &'static str, shift: u16) -> Result<()> {
    if shift >= MAX_SHIFT {
        return Err(NeError::ShiftOutOfRange { what, shift });
    }
    Ok(())
}
