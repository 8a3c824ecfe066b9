use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::error::{NeError, Result};
use super::scoped;
use super::table::{ResourceEntry, ResourceKind};
use super::ResourceVisitor;

pub const BLOCK_SIZE: usize = 4096;

/// On failure a partially written output file may be left behind.
pub fn extract_resource<R, P>(reader: &mut R, offset: u64, byte_count: u64, path: P) -> Result<()>
where
    R: Read + Seek,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut out = File::create(path).map_err(|source| NeError::OutputCreate {
        path: path.to_path_buf(),
        source,
    })?;
    let write_failed = |source| NeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    scoped::at_offset(reader, offset, "resource data", |r| {
        let mut buf = [0u8; BLOCK_SIZE];
        let mut remaining = byte_count;
        while remaining > 0 {
            let count = remaining.min(BLOCK_SIZE as u64) as usize;
            r.read_exact(&mut buf[..count])
                .map_err(NeError::read("resource data"))?;
            out.write_all(&buf[..count]).map_err(write_failed)?;
            remaining -= count as u64;
        }
        Ok(())
    })?;

    out.flush().map_err(write_failed)?;
    out.sync_all().map_err(write_failed)?;
    debug!("Copied {} bytes from 0x{:08X} to {:?}", byte_count, offset, path);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNaming {
    // `<prefix><type>-<resource>.bin` with five-digit indices.
    #[default]
    Indexed,
    // `<prefix><name or id>.<type extension>`.
    ResourceNames,
}

#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    // Prepended verbatim, so `out/` places files in a directory.
    pub prefix: String,
    pub naming: FileNaming,
}

impl DumpOptions {
    pub fn new(prefix: impl Into<String>, naming: FileNaming) -> Self {
        Self {
            prefix: prefix.into(),
            naming,
        }
    }

    pub fn file_name(&self, kind: &ResourceKind, entry: &ResourceEntry) -> PathBuf {
        let name = match self.naming {
            FileNaming::Indexed => format!("{}{:05}-{:05}.bin", self.prefix, entry.type_index, entry.index),
            FileNaming::ResourceNames => format!("{}{}.{}", self.prefix, entry.name, kind.extension()),
        };
        PathBuf::from(name)
    }
}

#[derive(Debug)]
pub struct Dumper {
    options: DumpOptions,
    written: Vec<PathBuf>,
}

impl Dumper {
    pub fn new(options: DumpOptions) -> Self {
        Self {
            options,
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.written.last().map(PathBuf::as_path)
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

impl<R: Read + Seek> ResourceVisitor<R> for Dumper {
    fn visit_resource(&mut self, reader: &mut R, kind: &ResourceKind, entry: &ResourceEntry) -> Result<()> {
        let path = self.options.file_name(kind, entry);
        extract_resource(reader, entry.byte_offset, entry.byte_length, &path)?;
        info!("Dumped {} ({} bytes) to {:?}", entry.name, entry.byte_length, path);
        self.written.push(path);
        Ok(())
    }
}
