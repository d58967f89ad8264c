//! The `e_ident` identification block (bytes 4..8).
//!
//! Unrecognised values are kept in an `Invalid` variant carrying the raw
//! byte; the format allows readers to meet values they do not know.

use crate::bytes::Endian;
use serde::Serialize;
use std::fmt;

/// `EI_CLASS`: the declared word size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Class {
    Invalid(u8),
    Elf32,
    Elf64,
}

impl From<u8> for Class {
    fn from(b: u8) -> Self {
        match b {
            1 => Class::Elf32,
            2 => Class::Elf64,
            other => Class::Invalid(other),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Class::Invalid(_) => "Invalid",
            Class::Elf32 => "ELF32",
            Class::Elf64 => "ELF64",
        };
        f.pad(s)
    }
}

/// `EI_DATA`: byte order of the rest of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataEncoding {
    Invalid(u8),
    LittleEndian,
    BigEndian,
}

impl DataEncoding {
    /// The raw `EI_DATA` byte.
    pub fn code(self) -> u8 {
        match self {
            DataEncoding::Invalid(b) => b,
            DataEncoding::LittleEndian => 1,
            DataEncoding::BigEndian => 2,
        }
    }

    pub fn endian(self) -> Option<Endian> {
        match self {
            DataEncoding::LittleEndian => Some(Endian::Little),
            DataEncoding::BigEndian => Some(Endian::Big),
            DataEncoding::Invalid(_) => None,
        }
    }
}

impl From<u8> for DataEncoding {
    fn from(b: u8) -> Self {
        match b {
            1 => DataEncoding::LittleEndian,
            2 => DataEncoding::BigEndian,
            other => DataEncoding::Invalid(other),
        }
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataEncoding::Invalid(_) => "Invalid",
            DataEncoding::LittleEndian => "2's complement, little endian",
            DataEncoding::BigEndian => "2's complement, big endian",
        };
        f.pad(s)
    }
}

/// `EI_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Version {
    Invalid(u8),
    Current,
}

impl From<u8> for Version {
    fn from(b: u8) -> Self {
        match b {
            1 => Version::Current,
            other => Version::Invalid(other),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Version::Invalid(_) => "Invalid",
            Version::Current => "Current",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_bytes_are_invalid() {
        assert_eq!(Class::from(0), Class::Invalid(0));
        assert_eq!(Class::from(7), Class::Invalid(7));
        assert_eq!(DataEncoding::from(3), DataEncoding::Invalid(3));
        assert_eq!(Version::from(2), Version::Invalid(2));
        assert_eq!(DataEncoding::from(0).endian(), None);
    }

    #[test]
    fn identification_line_labels() {
        let line = format!(
            "{} {} ({})",
            Class::from(1),
            Version::from(1),
            DataEncoding::from(2)
        );
        assert_eq!(line, "ELF32 Current (2's complement, big endian)");
    }
}
