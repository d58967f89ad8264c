pub mod elf;
pub mod ident;

use crate::tables::Machine;

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the virtual address of the entry point.
    fn entry_point(&self) -> u64;

    /// Returns the machine architecture identifier.
    fn machine(&self) -> Machine;

    /// Returns true if the identification block declares a 64-bit file.
    fn is_64(&self) -> bool;

    /// Returns a short human-readable name, e.g. "ELF32".
    fn format_name(&self) -> &'static str;

    /// Returns true if the file is an executable (vs object/lib).
    fn is_executable(&self) -> bool;
}

/// Knobs for header decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with `UnsupportedClass` on ELF64 input instead of decoding it
    /// with ELF32 field widths.
    pub reject_elf64: bool,
}
