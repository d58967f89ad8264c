pub mod binary;
mod bytes;
pub mod error;
pub mod header;
pub mod sections;
pub mod tables;

pub use binary::*;
pub use bytes::Endian;
pub use error::{DecodeError, Region};
pub use header::elf::{decode_header, decode_header_with, FileHeader, ELF_MAGIC};
pub use header::ident::{Class, DataEncoding, Version};
pub use header::{DecodeOptions, Header};
pub use sections::*;
pub use tables::{FileType, Machine, OsAbi, SectionFlags, SectionType};
