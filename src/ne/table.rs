use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Seek};

use binrw::binrw;
use byteorder::ReadBytesExt;

use super::error::{NeError, Result};
use super::scoped;
use super::types;

// High bit of a type or resource id: set for integer ids, clear for string offsets.
pub const INTEGER_ID_FLAG: u16 = 0x8000;

pub const MAX_NAME_LEN: usize = 256;

#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct TypeBlock {
    pub type_id: u16,
    #[brw(pad_after = 4)]
    pub count: u16,
}

impl TypeBlock {
    pub const SIZE: u64 = 8;

    pub fn is_terminator(&self) -> bool {
        self.type_id == 0
    }
}

#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct ResourceBlock {
    pub offset: u16, // In units of the table's offset shift
    pub length: u16, // In units of the header's alignment shift
    pub flags: u16,
    #[brw(pad_after = 4)]
    pub id: u16,
}

impl ResourceBlock {
    pub const SIZE: u64 = 12;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawId {
    Integer(u16),
    // Offset of a counted string, relative to the resource table.
    Named(u16),
}

impl RawId {
    pub fn classify(raw: u16) -> Self {
        if raw & INTEGER_ID_FLAG != 0 {
            RawId::Integer(raw & !INTEGER_ID_FLAG)
        } else {
            RawId::Named(raw)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    BuiltIn(u16),
    Custom(String),
}

impl ResourceKind {
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            ResourceKind::BuiltIn(id) => types::name_of(*id),
            ResourceKind::Custom(name) => Cow::Borrowed(name),
        }
    }

    // Custom types use their own name as the extension.
    pub fn extension(&self) -> &str {
        match self {
            ResourceKind::BuiltIn(id) => types::extension_of(*id),
            ResourceKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::BuiltIn(id) => write!(f, "0x{:04X} {:<16}", id, types::name_of(*id)),
            ResourceKind::Custom(name) => write!(f, "{:<23}", format!("'{}'", name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceName {
    Id(u16),
    Name(String),
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceName::Id(id) => write!(f, "{:05}", id),
            ResourceName::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub type_index: usize,
    pub index: usize,
    pub flags: u16,
    pub byte_offset: u64,
    pub byte_length: u64,
    pub name: ResourceName,
}

impl ResourceEntry {
    pub const FLAG_MOVEABLE: u16 = 0x0010;
    pub const FLAG_PURE: u16 = 0x0020;
    pub const FLAG_PRELOAD: u16 = 0x0040;

    pub fn is_moveable(&self) -> bool {
        self.flags & Self::FLAG_MOVEABLE != 0
    }

    pub fn is_pure(&self) -> bool {
        self.flags & Self::FLAG_PURE != 0
    }

    pub fn is_preload(&self) -> bool {
        self.flags & Self::FLAG_PRELOAD != 0
    }

    // Display only; extraction never looks at the flags.
    pub fn flag_names(&self) -> Vec<&'static str> {
        [
            (self.is_moveable(), "moveable"),
            (self.is_pure(), "pure"),
            (self.is_preload(), "preload"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub index: usize,
    pub kind: ResourceKind,
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    pub offset_shift: u16,
    pub size_shift: u16,
    pub types: Vec<TypeEntry>,
}

impl ResourceTable {
    pub fn resource_count(&self) -> usize {
        self.types.iter().map(|t| t.resources.len()).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ResourceKind, &ResourceEntry)> {
        self.types
            .iter()
            .flat_map(|t| t.resources.iter().map(move |r| (&t.kind, r)))
    }
}

/// Reads the counted string at `offset` without moving the reader.
pub fn read_counted_string<R: Read + Seek>(reader: &mut R, offset: u64, max_len: usize) -> Result<String> {
    scoped::at_offset(reader, offset, "counted string", |r| {
        let length = usize::from(r.read_u8().map_err(NeError::read("counted string length"))?);
        if length > max_len {
            return Err(NeError::StringTooLong {
                offset,
                length,
                max: max_len,
            });
        }
        let mut buf = vec![0u8; length];
        r.read_exact(&mut buf)
            .map_err(NeError::read("counted string data"))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

pub fn resolve_type<R: Read + Seek>(reader: &mut R, raw: u16, table_base: u64) -> Result<ResourceKind> {
    match RawId::classify(raw) {
        RawId::Integer(id) => Ok(ResourceKind::BuiltIn(id)),
        RawId::Named(offset) => {
            read_counted_string(reader, table_base + u64::from(offset), MAX_NAME_LEN).map(ResourceKind::Custom)
        }
    }
}

pub fn resolve_name<R: Read + Seek>(reader: &mut R, raw: u16, table_base: u64) -> Result<ResourceName> {
    match RawId::classify(raw) {
        RawId::Integer(id) => Ok(ResourceName::Id(id)),
        RawId::Named(offset) => {
            read_counted_string(reader, table_base + u64::from(offset), MAX_NAME_LEN).map(ResourceName::Name)
        }
    }
}
