use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The part of the file a failed bounds check was reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    /// The fixed 52-byte file header.
    FileHeader,
    /// The section-header entry at this index.
    Section(usize),
    /// The byte range of the section-header string table.
    StringTable,
    /// The name of the section at this index, inside the string table.
    SectionName(usize),
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::FileHeader => write!(f, "file header"),
            Region::Section(i) => write!(f, "section header [{i}]"),
            Region::StringTable => write!(f, "section header string table"),
            Region::SectionName(i) => write!(f, "name of section [{i}]"),
        }
    }
}

/// Errors produced while decoding an ELF image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Input is not ELF file data")]
    NotElf,
    #[error("Unsupported data encoding {0} (expected 1 or 2)")]
    UnsupportedEncoding(u8),
    #[error("Unsupported ELF class {0}")]
    UnsupportedClass(u8),
    #[error("{region} truncated: bytes {start}..{end} requested, buffer holds {len}")]
    Truncated {
        region: Region,
        start: u64,
        end: u64,
        len: usize,
    },
    #[error("Section header string table index {index} out of range ({count} sections)")]
    InvalidStringIndex { index: u16, count: u16 },
}

impl DecodeError {
    /// Returns the offending section index for errors tied to a single entry.
    pub fn section_index(&self) -> Option<usize> {
        match self {
            DecodeError::Truncated {
                region: Region::Section(i) | Region::SectionName(i),
                ..
            } => Some(*i),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_index_only_for_entry_errors() {
        let err = DecodeError::Truncated {
            region: Region::SectionName(3),
            start: 0,
            end: 8,
            len: 4,
        };
        assert_eq!(err.section_index(), Some(3));

        let err = DecodeError::Truncated {
            region: Region::StringTable,
            start: 0,
            end: 8,
            len: 4,
        };
        assert_eq!(err.section_index(), None);
        assert_eq!(DecodeError::NotElf.section_index(), None);
    }

    #[test]
    fn messages_name_the_region() {
        let err = DecodeError::Truncated {
            region: Region::Section(1),
            start: 120,
            end: 160,
            len: 140,
        };
        assert_eq!(
            err.to_string(),
            "section header [1] truncated: bytes 120..160 requested, buffer holds 140"
        );
    }
}
