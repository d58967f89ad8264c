use byteorder::{ReadBytesExt, BE, LE};
use serde::Serialize;
use std::io::{self, Cursor};

/// Byte order used for every multi-byte field after the identification block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endian {
    Little,
    Big,
}

/// Sequential fixed-width field reader over a borrowed slice.
pub(crate) struct FieldReader<'a> {
    cur: Cursor<&'a [u8]>,
    endian: Endian,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            cur: Cursor::new(data),
            endian,
        }
    }

    pub(crate) fn u16(&mut self) -> io::Result<u16> {
        match self.endian {
            Endian::Little => self.cur.read_u16::<LE>(),
            Endian::Big => self.cur.read_u16::<BE>(),
        }
    }

    pub(crate) fn u32(&mut self) -> io::Result<u32> {
        match self.endian {
            Endian::Little => self.cur.read_u32::<LE>(),
            Endian::Big => self.cur.read_u32::<BE>(),
        }
    }
}

/// Returns `data[start..start + len]`, or the requested `(start, end)` pair
/// when the range overflows or does not fit.
pub(crate) fn region(data: &[u8], start: u64, len: u64) -> Result<&[u8], (u64, u64)> {
    let end = start.checked_add(len).ok_or((start, u64::MAX))?;
    if end > data.len() as u64 {
        return Err((start, end));
    }
    Ok(&data[start as usize..end as usize])
}

/// Reads the NUL-terminated string starting at `offset` within `table`.
/// Returns `None` if `offset` is out of range or no NUL follows it.
pub(crate) fn cstr_at(table: &[u8], offset: usize) -> Option<&[u8]> {
    let tail = table.get(offset..)?;
    let nul = tail.iter().position(|&b| b == 0)?;
    Some(&tail[..nul])
}
