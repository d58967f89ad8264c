use elfpeek_core::{FileHeader, SectionHeader};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Formats `n` with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn identification_line(h: &FileHeader) -> String {
    format!("{} {} ({})", h.class, h.version, h.data_encoding)
}

/// Labelled header fields, one per line.
pub fn header_lines(h: &FileHeader) -> Vec<String> {
    vec![
        format!("Type: {}", h.file_type),
        format!("OS ABI: {}", h.os_abi),
        format!("Machine: {}", h.machine),
        format!("Version: 0x{:02x}", h.object_version),
        format!("Entry: 0x{:08x}", h.entry_point),
        format!(
            "Program headers offset: {} bytes",
            group_thousands(h.program_header_offset as u64)
        ),
        format!(
            "Section headers offset: {} bytes",
            group_thousands(h.section_header_offset as u64)
        ),
        format!("Flags: 0x{:08x}", h.flags),
        format!("Elf header size: {} bytes", group_thousands(h.header_size as u64)),
        format!(
            "Program header entry size: {} bytes",
            group_thousands(h.program_header_entry_size as u64)
        ),
        format!("Number of program headers: {}", h.program_header_count),
        format!(
            "Section header entry size: {} bytes",
            group_thousands(h.section_header_entry_size as u64)
        ),
        format!("Number of section headers: {}", h.section_header_count),
        format!(
            "Section header string table index: {}",
            h.section_header_string_index
        ),
    ]
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "[Nr]")]
    index: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    section_type: String,
    #[tabled(rename = "Addr")]
    address: String,
    #[tabled(rename = "Off")]
    offset: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "ES")]
    entry_size: String,
    #[tabled(rename = "Flg")]
    flags: String,
    #[tabled(rename = "Lk")]
    link: String,
    #[tabled(rename = "Inf")]
    info: String,
    #[tabled(rename = "Al")]
    address_align: String,
}

impl SectionRow {
    fn new(index: usize, sh: &SectionHeader) -> Self {
        Self {
            index: format!("[{index:>2}]"),
            name: sh.name.clone(),
            section_type: sh.section_type.to_string(),
            address: format!("{:08x}", sh.address),
            offset: format!("{:06x}", sh.offset),
            size: format!("{:06x}", sh.size),
            entry_size: format!("{:02x}", sh.entry_size),
            flags: sh.flags_symbolic.clone(),
            link: sh.link.to_string(),
            info: sh.info.to_string(),
            address_align: sh.address_align.to_string(),
        }
    }
}

pub fn section_table(sections: &[SectionHeader]) -> String {
    let rows = sections
        .iter()
        .enumerate()
        .map(|(i, sh)| SectionRow::new(i, sh));
    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}
