//! Symbolic names for the coded fields of ELF headers.
//!
//! Every table is immutable static data. Codes that have no entry are
//! rendered as their decimal value so no information is lost.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

static OS_ABI: &[(u8, &str)] = &[
    (0, "UNIX System V"),
    (1, "HP-UX"),
    (2, "NetBSD"),
    (3, "GNU/Linux"),
    (4, "GNU/Hurd"),
    (6, "Solaris"),
    (7, "AIX"),
    (8, "IRIX"),
    (9, "FreeBSD"),
    (10, "TRU64 UNIX"),
    (11, "Novell Modesto"),
    (12, "OpenBSD"),
    (13, "OpenVMS"),
    (14, "HP Non-Stop Kernel"),
    (15, "Amiga Research OS"),
    (97, "ARM"),
    (255, "Standalone (embedded)"),
];

static MACHINE: &[(u16, &str)] = &[
    (0, "No machine"),
    (2, "SPARC"),
    (3, "Intel 80386"),
    (6, "Intel 80486"),
    (7, "Intel 80860"),
    (8, "MIPS R3000"),
    (9, "IBM System/370"),
    (18, "SPARC 32+"),
    (19, "Intel 80960"),
    (20, "PPC"),
    (21, "PPC64"),
    (22, "IBM S/390"),
    (40, "ARM"),
    (43, "SPARC V9"),
    (50, "Intel IA-64"),
    (62, "AMD x86-64"),
    (183, "AArch64"),
    (243, "RISC-V"),
];

static FILE_TYPE: &[(u16, &str)] = &[
    (0, "No file type"),
    (1, "Relocatable file"),
    (2, "Executable file"),
    (3, "Shared object file"),
    (4, "Core file"),
    (0xff00, "Processor-specific"),
    (0xffff, "Processor-specific"),
];

static SECTION_TYPE: &[(u32, &str)] = &[
    (0, "NULL"),
    (1, "PROGBITS"),
    (2, "SYMTAB"),
    (3, "STRTAB"),
    (4, "RELA"),
    (5, "HASH"),
    (6, "DYNAMIC"),
    (7, "NOTE"),
    (8, "NOBITS"),
    (9, "REL"),
    (10, "SHLIB"),
    (11, "DYNSYM"),
    (12, "NUM"),
    (14, "INIT_ARRAY"),
    (15, "FINI_ARRAY"),
    (16, "PREINIT_ARRAY"),
    (17, "GROUP"),
    (18, "SYMTAB_SHNDX"),
    (0x6fff_fff5, "GNU_ATTR"),
    (0x6fff_fff6, "GNU_HASH"),
    (0x6fff_fff7, "GNU_LIBLIST"),
    (0x6fff_fff8, "CHECKSUM"),
    (0x6fff_fffd, "VERDEF"),
    (0x6fff_fffe, "VERNEED"),
    (0x6fff_ffff, "VERSYM"),
    (0x7000_0000, "LOPROC"),
    (0x7fff_ffff, "HIPROC"),
    (0x8000_0000, "LOUSER"),
    (0xffff_ffff, "HIUSER"),
];

fn lookup<T: Copy + PartialEq>(table: &[(T, &'static str)], code: T) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

macro_rules! coded_field {
    ($(#[$meta:meta])* $ty:ident($repr:ty) => $table:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $ty(pub $repr);

        impl $ty {
            /// Symbolic name, if the code is known.
            pub fn name(self) -> Option<&'static str> {
                lookup($table, self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.name() {
                    Some(name) => f.pad(name),
                    None => f.pad(&self.0.to_string()),
                }
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                let mut st = s.serialize_struct(stringify!($ty), 2)?;
                st.serialize_field("code", &self.0)?;
                st.serialize_field("name", &self.name())?;
                st.end()
            }
        }
    };
}

coded_field!(
    /// Target operating system / ABI (`EI_OSABI`).
    OsAbi(u8) => OS_ABI
);
coded_field!(
    /// Target architecture (`e_machine`).
    Machine(u16) => MACHINE
);
coded_field!(
    /// Object file type (`e_type`).
    FileType(u16) => FILE_TYPE
);
coded_field!(
    /// Section content kind (`sh_type`).
    SectionType(u32) => SECTION_TYPE
);

/// Raw section flag bitmask (`sh_flags`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(transparent)]
pub struct SectionFlags(pub u32);

impl SectionFlags {
    /// Bits not covered by any known flag mask.
    pub const UNKNOWN_MASK: u32 = !SECTION_FLAGS_UNION;

    /// Renders the set flags as letters in ascending mask order. Bits no
    /// known mask covers append a single `?`.
    pub fn symbolic(self) -> String {
        let mut out: String = SECTION_FLAGS
            .iter()
            .filter(|(mask, _)| self.0 & mask != 0)
            .map(|(_, letter)| *letter)
            .collect();
        if self.0 & Self::UNKNOWN_MASK != 0 {
            out.push('?');
        }
        out
    }
}

/// Section flag letters, sorted by mask value. Some masks span several bits.
const SECTION_FLAGS: [(u32, char); 14] = [
    (0x1, 'W'),
    (0x2, 'A'),
    (0x4, 'X'),
    (0x10, 'M'),
    (0x20, 'S'),
    (0x40, 'I'),
    (0x80, 'L'),
    (0x100, 'N'),
    (0x200, 'G'),
    (0x400, 'T'),
    (0x0ff0_0000, 'K'),
    (0x4000_0000, 'O'),
    (0x8000_0000, 'E'),
    (0xf000_0000, 'P'),
];

const SECTION_FLAGS_UNION: u32 = {
    let mut acc = 0;
    let mut i = 0;
    while i < SECTION_FLAGS.len() {
        acc |= SECTION_FLAGS[i].0;
        i += 1;
    }
    acc
};
