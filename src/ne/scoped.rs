use std::io::{Seek, SeekFrom};

use super::error::{NeError, Result};

/// Runs `op` with the reader's position restored afterwards.
pub fn preserve_position<R, T, F>(reader: &mut R, op: F) -> Result<T>
where
    R: Seek,
    F: FnOnce(&mut R) -> Result<T>,
{
    let saved = reader
        .stream_position()
        .map_err(NeError::read("save stream position"))?;

    let outcome = op(reader);
    let restored = reader
        .seek(SeekFrom::Start(saved))
        .map_err(NeError::seek("restore stream position", saved));

    // The inner error wins; it is the one that explains what went wrong.
    let value = outcome?;
    restored?;
    Ok(value)
}

pub fn at_offset<R, T, F>(reader: &mut R, offset: u64, context: &'static str, op: F) -> Result<T>
where
    R: Seek,
    F: FnOnce(&mut R) -> Result<T>,
{
    preserve_position(reader, |r| {
        r.seek(SeekFrom::Start(offset))
            .map_err(NeError::seek(context, offset))?;
        op(r)
    })
}
