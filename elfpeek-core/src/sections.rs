use crate::bytes::{self, Endian, FieldReader};
use crate::error::{DecodeError, Region, Result};
use crate::header::elf::FileHeader;
use crate::tables::{SectionFlags, SectionType};
use serde::Serialize;

/// Bytes consumed by the ten 32-bit fields of an `Elf32_Shdr`.
pub const ELF32_SECTION_HEADER_SIZE: usize = 40;

/// A section header as laid out on disk, before its name is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSectionHeader {
    pub name_offset: u32,
    pub section_type: SectionType,
    pub flags: SectionFlags,
    pub address: u32,
    pub offset: u32,
    pub size: u32,
    pub link: u32,
    pub info: u32,
    pub address_align: u32,
    pub entry_size: u32,
}

impl RawSectionHeader {
    fn read(entry: &[u8], endian: Endian) -> std::io::Result<Self> {
        let mut cur = FieldReader::new(entry, endian);
        Ok(Self {
            name_offset: cur.u32()?,
            section_type: SectionType(cur.u32()?),
            flags: SectionFlags(cur.u32()?),
            address: cur.u32()?,
            offset: cur.u32()?,
            size: cur.u32()?,
            link: cur.u32()?,
            info: cur.u32()?,
            address_align: cur.u32()?,
            entry_size: cur.u32()?,
        })
    }

    /// Attaches the name found at `name_offset` in `strtab`. `index` is this
    /// section's position and only used for error reporting.
    pub fn resolve(&self, strtab: &[u8], index: usize) -> Result<SectionHeader> {
        let start = self.name_offset as usize;
        let name = bytes::cstr_at(strtab, start).ok_or(DecodeError::Truncated {
            region: Region::SectionName(index),
            start: self.name_offset as u64,
            end: strtab.len() as u64,
            len: strtab.len(),
        })?;

        Ok(SectionHeader {
            name: String::from_utf8_lossy(name).into_owned(),
            name_offset: self.name_offset,
            section_type: self.section_type,
            flags: self.flags,
            flags_symbolic: self.flags.symbolic(),
            address: self.address,
            offset: self.offset,
            size: self.size,
            link: self.link,
            info: self.info,
            address_align: self.address_align,
            entry_size: self.entry_size,
        })
    }
}

/// A decoded section header with its name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHeader {
    pub name: String,
    pub name_offset: u32,
    pub section_type: SectionType,
    pub flags: SectionFlags,
    /// Flag letters, e.g. `"AX"` for an allocated executable section.
    pub flags_symbolic: String,
    pub address: u32,
    pub offset: u32,
    pub size: u32,
    pub link: u32,
    pub info: u32,
    pub address_align: u32,
    pub entry_size: u32,
}

/// Decodes every entry of the section header table without resolving names.
pub fn read_raw_sections(bytes: &[u8], header: &FileHeader) -> Result<Vec<RawSectionHeader>> {
    let count = header.section_header_count as usize;
    if count == 0 {
        return Ok(Vec::new());
    }
    let endian = header
        .endian()
        .ok_or(DecodeError::UnsupportedEncoding(header.data_encoding.code()))?;

    let entry_size = header.section_header_entry_size as u64;
    let mut sections = Vec::with_capacity(count);
    for i in 0..count {
        let start = header.section_header_offset as u64 + i as u64 * entry_size;
        let truncated = |(start, end): (u64, u64)| DecodeError::Truncated {
            region: Region::Section(i),
            start,
            end,
            len: bytes.len(),
        };
        let entry = bytes::region(bytes, start, entry_size).map_err(truncated)?;
        let raw = RawSectionHeader::read(entry, endian)
            .map_err(|_| truncated((start, start + ELF32_SECTION_HEADER_SIZE as u64)))?;
        sections.push(raw);
    }
    Ok(sections)
}

/// Decodes the section header table and resolves every section's name
/// through the section header string table.
///
/// Returns an empty list when the header declares no sections. Any bad
/// entry fails the whole call.
pub fn decode_sections(bytes: &[u8], header: &FileHeader) -> Result<Vec<SectionHeader>> {
    let raw = read_raw_sections(bytes, header)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let strndx = header.section_header_string_index as usize;
    let strtab_hdr = raw.get(strndx).ok_or(DecodeError::InvalidStringIndex {
        index: header.section_header_string_index,
        count: header.section_header_count,
    })?;
    let strtab = bytes::region(bytes, strtab_hdr.offset as u64, strtab_hdr.size as u64).map_err(
        |(start, end)| DecodeError::Truncated {
            region: Region::StringTable,
            start,
            end,
            len: bytes.len(),
        },
    )?;

    let sections = raw
        .iter()
        .enumerate()
        .map(|(i, sh)| sh.resolve(strtab, i))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Decoded {} section headers (string table at [{}], {} bytes)",
        sections.len(),
        strndx,
        strtab.len()
    );
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name_offset: u32, flags: u32) -> RawSectionHeader {
        RawSectionHeader {
            name_offset,
            section_type: SectionType(1),
            flags: SectionFlags(flags),
            address: 0x1000,
            offset: 0x200,
            size: 0x40,
            link: 0,
            info: 0,
            address_align: 16,
            entry_size: 0,
        }
    }

    #[test]
    fn resolve_keeps_numeric_fields() {
        let strtab = b"\0.text\0.shstrtab\0";
        let sh = raw(1, 0x6).resolve(strtab, 1).unwrap();
        assert_eq!(sh.name, ".text");
        assert_eq!(sh.flags_symbolic, "AX");
        assert_eq!(sh.flags, SectionFlags(6));
        assert_eq!(sh.section_type, SectionType(1));
        assert_eq!(sh.section_type.to_string(), "PROGBITS");
        assert_eq!(sh.address, 0x1000);
        assert_eq!(sh.address_align, 16);
    }

    #[test]
    fn resolve_empty_name() {
        let sh = raw(0, 0).resolve(b"\0.text\0", 0).unwrap();
        assert_eq!(sh.name, "");
        assert_eq!(sh.flags_symbolic, "");
    }

    #[test]
    fn resolve_out_of_range_offset() {
        let err = raw(7, 0).resolve(b"\0.text\0", 2).unwrap_err();
        assert_eq!(err.section_index(), Some(2));
        assert!(matches!(
            err,
            DecodeError::Truncated {
                region: Region::SectionName(2),
                ..
            }
        ));
    }

    #[test]
    fn resolve_unterminated_name() {
        let err = raw(1, 0).resolve(b"\0.text", 3).unwrap_err();
        assert_eq!(err.section_index(), Some(3));
    }

    #[test]
    fn read_big_endian_entry() {
        let mut entry = Vec::new();
        for v in [1u32, 3, 0x20, 0, 0x100, 0x11, 0, 0, 1, 0] {
            entry.extend_from_slice(&v.to_be_bytes());
        }
        let sh = RawSectionHeader::read(&entry, Endian::Big).unwrap();
        assert_eq!(sh.name_offset, 1);
        assert_eq!(sh.section_type.to_string(), "STRTAB");
        assert_eq!(sh.flags.symbolic(), "S");
        assert_eq!(sh.offset, 0x100);
        assert_eq!(sh.size, 0x11);
        assert_eq!(sh.address_align, 1);
    }

    #[test]
    fn short_entry_fails_to_read() {
        assert!(RawSectionHeader::read(&[0u8; 36], Endian::Little).is_err());
    }
}
