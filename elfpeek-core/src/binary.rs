use crate::error::Result;
use crate::header::elf::{decode_header_with, FileHeader};
use crate::header::{DecodeOptions, Header};
use crate::sections::{decode_sections, SectionHeader};
use serde::Serialize;

/// A decoded ELF image: the file header plus its named section headers.
///
/// Owns all of its data; the input buffer may be dropped after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElfFile {
    pub header: FileHeader,
    pub section_headers: Vec<SectionHeader>,
}

impl ElfFile {
    pub fn parse(bytes: &[u8], opts: &DecodeOptions) -> Result<Self> {
        let header = decode_header_with(bytes, opts)?;

        let section_headers = if header.section_header_count > 0 {
            log::info!("Has {} section headers", header.section_header_count);
            decode_sections(bytes, &header)?
        } else {
            log::warn!("No section headers (possibly stripped binary)");
            Vec::new()
        };

        if header.program_header_count > 0 {
            log::debug!(
                "Skipping {} program headers at {:#x}",
                header.program_header_count,
                header.program_header_offset
            );
        }

        Ok(Self {
            header,
            section_headers,
        })
    }

    pub fn get_entry_offset(&self) -> u64 {
        self.header.entry_point()
    }

    /// First section whose name equals `name`.
    pub fn section_by_name(&self, name: &str) -> Option<&SectionHeader> {
        self.section_headers.iter().find(|sh| sh.name == name)
    }

    /// The section holding section names, if there are any sections.
    pub fn string_table_section(&self) -> Option<&SectionHeader> {
        self.section_headers
            .get(self.header.section_header_string_index as usize)
    }
}
