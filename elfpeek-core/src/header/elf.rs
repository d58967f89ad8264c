use crate::bytes::{Endian, FieldReader};
use crate::error::{DecodeError, Region, Result};
use crate::header::ident::{Class, DataEncoding, Version};
use crate::header::{DecodeOptions, Header};
use crate::tables::{FileType, Machine, OsAbi};
use serde::Serialize;

/// `0x7F 'E' 'L' 'F'`.
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Size of the ELF32 file header, the minimum input this decoder accepts.
pub const ELF32_HEADER_SIZE: usize = 52;

/// Offset of `e_type`, the first field after the 16-byte `e_ident` block.
const FIELDS_START: usize = 16;

/// Represents the ELF file header, decoded with the ELF32 field layout.
///
/// This corresponds to the standard `Elf32_Ehdr`. It appears at the very
/// beginning of every ELF file and describes where the rest of the file's
/// tables live.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHeader {
    /// Declared word size (`EI_CLASS`).
    pub class: Class,

    /// Byte order of every multi-byte field (`EI_DATA`).
    pub data_encoding: DataEncoding,

    /// Identification version (`EI_VERSION`, usually `Current`).
    pub version: Version,

    /// Target OS / ABI (`EI_OSABI`).
    pub os_abi: OsAbi,

    /// Object file type (`e_type`).
    ///
    /// Common values:
    /// - `ET_REL` (1): Relocatable file
    /// - `ET_EXEC` (2): Executable file
    /// - `ET_DYN` (3): Shared object
    /// - `ET_CORE` (4): Core dump
    pub file_type: FileType,

    /// Target architecture (`e_machine`), e.g. `EM_386` (3) or `EM_X86_64` (62).
    pub machine: Machine,

    /// Object file version word (`e_version`).
    pub object_version: u32,

    /// Virtual address of the program entry point (`e_entry`).
    pub entry_point: u32,

    /// File offset of the program header table (`e_phoff`).
    pub program_header_offset: u32,

    /// File offset of the section header table (`e_shoff`).
    pub section_header_offset: u32,

    /// Processor-specific flags (`e_flags`).
    pub flags: u32,

    /// Size of this header (`e_ehsize`, 52 for ELF32).
    pub header_size: u16,

    /// Size of one program header entry (`e_phentsize`).
    pub program_header_entry_size: u16,

    /// Number of program header entries (`e_phnum`).
    pub program_header_count: u16,

    /// Size of one section header entry (`e_shentsize`, 40 for ELF32).
    pub section_header_entry_size: u16,

    /// Number of section header entries (`e_shnum`).
    pub section_header_count: u16,

    /// Index of the section header string table (`e_shstrndx`).
    ///
    /// That section holds the names of all other sections.
    pub section_header_string_index: u16,
}

impl FileHeader {
    /// Byte order selected by `data_encoding`. Always `Some` for a header
    /// returned by [`decode_header`].
    pub fn endian(&self) -> Option<Endian> {
        self.data_encoding.endian()
    }
}

impl Header for FileHeader {
    fn entry_point(&self) -> u64 {
        self.entry_point as u64
    }

    fn machine(&self) -> Machine {
        self.machine
    }

    fn is_64(&self) -> bool {
        self.class == Class::Elf64
    }

    fn format_name(&self) -> &'static str {
        match self.class {
            Class::Elf64 => "ELF64",
            _ => "ELF32",
        }
    }

    fn is_executable(&self) -> bool {
        self.file_type == FileType(2)
    }
}

/// Decodes the file header with default options.
pub fn decode_header(bytes: &[u8]) -> Result<FileHeader> {
    decode_header_with(bytes, &DecodeOptions::default())
}

/// Decodes the file header.
///
/// Input not starting with [`ELF_MAGIC`] is rejected with `NotElf` before
/// anything else is read.
pub fn decode_header_with(bytes: &[u8], opts: &DecodeOptions) -> Result<FileHeader> {
    if !bytes.starts_with(&ELF_MAGIC) {
        return Err(DecodeError::NotElf);
    }
    if bytes.len() < ELF32_HEADER_SIZE {
        return Err(DecodeError::Truncated {
            region: Region::FileHeader,
            start: 0,
            end: ELF32_HEADER_SIZE as u64,
            len: bytes.len(),
        });
    }

    let class = Class::from(bytes[4]);
    let data_encoding = DataEncoding::from(bytes[5]);
    let version = Version::from(bytes[6]);
    let os_abi = OsAbi(bytes[7]);

    if class == Class::Elf64 {
        if opts.reject_elf64 {
            return Err(DecodeError::UnsupportedClass(bytes[4]));
        }
        log::warn!("ELF64 header decoded with ELF32 field widths; offsets may be wrong");
    }

    let endian = data_encoding.endian().ok_or_else(|| {
        log::warn!("Unknown data encoding {}", bytes[5]);
        DecodeError::UnsupportedEncoding(bytes[5])
    })?;

    let truncated = |_: std::io::Error| DecodeError::Truncated {
        region: Region::FileHeader,
        start: FIELDS_START as u64,
        end: ELF32_HEADER_SIZE as u64,
        len: bytes.len(),
    };
    let mut cur = FieldReader::new(&bytes[FIELDS_START..ELF32_HEADER_SIZE], endian);

    let header = FileHeader {
        class,
        data_encoding,
        version,
        os_abi,
        file_type: FileType(cur.u16().map_err(truncated)?),
        machine: Machine(cur.u16().map_err(truncated)?),
        object_version: cur.u32().map_err(truncated)?,
        entry_point: cur.u32().map_err(truncated)?,
        program_header_offset: cur.u32().map_err(truncated)?,
        section_header_offset: cur.u32().map_err(truncated)?,
        flags: cur.u32().map_err(truncated)?,
        header_size: cur.u16().map_err(truncated)?,
        program_header_entry_size: cur.u16().map_err(truncated)?,
        program_header_count: cur.u16().map_err(truncated)?,
        section_header_entry_size: cur.u16().map_err(truncated)?,
        section_header_count: cur.u16().map_err(truncated)?,
        section_header_string_index: cur.u16().map_err(truncated)?,
    };

    if header.section_header_count > 0
        && header.section_header_string_index >= header.section_header_count
    {
        return Err(DecodeError::InvalidStringIndex {
            index: header.section_header_string_index,
            count: header.section_header_count,
        });
    }

    log::debug!(
        "{} {} header: type={} machine={} shoff={:#x} shnum={}",
        header.class,
        header.data_encoding,
        header.file_type,
        header.machine,
        header.section_header_offset,
        header.section_header_count
    );
    Ok(header)
}
