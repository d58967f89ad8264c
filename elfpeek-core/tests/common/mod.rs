//! Builds small synthetic ELF32 images for the decoder tests.
#![allow(dead_code)]

use byteorder::{ByteOrder, WriteBytesExt};

pub const SHT_NULL: u32 = 0;
pub const SHT_PROGBITS: u32 = 1;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_NOBITS: u32 = 8;

pub struct SectionSpec {
    pub name: &'static str,
    pub sh_type: u32,
    pub flags: u32,
    pub data: Vec<u8>,
}

impl SectionSpec {
    pub fn new(name: &'static str, sh_type: u32, flags: u32, data: &[u8]) -> Self {
        Self {
            name,
            sh_type,
            flags,
            data: data.to_vec(),
        }
    }
}

pub struct ImageSpec {
    pub machine: u16,
    pub file_type: u16,
    pub os_abi: u8,
    /// Sections in table order. A `.shstrtab` section is appended last.
    pub sections: Vec<SectionSpec>,
}

impl Default for ImageSpec {
    fn default() -> Self {
        Self {
            machine: 62,
            file_type: 2,
            os_abi: 0,
            sections: Vec::new(),
        }
    }
}

/// Lays out header, section contents, string table, then the section
/// header table, all in byte order `E`.
pub fn build<E: ByteOrder>(spec: &ImageSpec) -> Vec<u8> {
    let encoding = if E::read_u16(&[1, 0]) == 1 { 1 } else { 2 };

    let mut strtab = vec![0u8];
    let mut name_offsets = Vec::new();
    for s in &spec.sections {
        if s.name.is_empty() {
            name_offsets.push(0);
            continue;
        }
        name_offsets.push(strtab.len() as u32);
        strtab.extend_from_slice(s.name.as_bytes());
        strtab.push(0);
    }
    let strtab_name = strtab.len() as u32;
    strtab.extend_from_slice(b".shstrtab\0");

    let mut image = vec![0u8; 52];
    let mut data_offsets = Vec::new();
    for s in &spec.sections {
        data_offsets.push(image.len() as u32);
        image.extend_from_slice(&s.data);
    }
    let strtab_offset = image.len() as u32;
    image.extend_from_slice(&strtab);
    while image.len() % 4 != 0 {
        image.push(0);
    }

    let shoff = image.len() as u32;
    let shnum = spec.sections.len() as u16 + 1;
    for (i, s) in spec.sections.iter().enumerate() {
        let addr = if s.flags & 0x2 != 0 {
            0x0804_8000 + data_offsets[i]
        } else {
            0
        };
        let fields = [
            name_offsets[i],
            s.sh_type,
            s.flags,
            addr,
            data_offsets[i],
            s.data.len() as u32,
            0,
            0,
            if s.sh_type == SHT_NULL { 0 } else { 4 },
            0,
        ];
        for f in fields {
            image.write_u32::<E>(f).unwrap();
        }
    }
    for f in [
        strtab_name,
        SHT_STRTAB,
        0,
        0,
        strtab_offset,
        strtab.len() as u32,
        0,
        0,
        1,
        0,
    ] {
        image.write_u32::<E>(f).unwrap();
    }

    let mut header = vec![0x7f, b'E', b'L', b'F', 1, encoding, 1, spec.os_abi];
    header.resize(16, 0);
    header.write_u16::<E>(spec.file_type).unwrap();
    header.write_u16::<E>(spec.machine).unwrap();
    header.write_u32::<E>(1).unwrap();
    header.write_u32::<E>(0x0804_8000).unwrap();
    header.write_u32::<E>(0).unwrap();
    header.write_u32::<E>(shoff).unwrap();
    header.write_u32::<E>(0).unwrap();
    header.write_u16::<E>(52).unwrap();
    header.write_u16::<E>(32).unwrap();
    header.write_u16::<E>(0).unwrap();
    header.write_u16::<E>(40).unwrap();
    header.write_u16::<E>(shnum).unwrap();
    header.write_u16::<E>(shnum - 1).unwrap();
    image[..52].copy_from_slice(&header);

    image
}

/// Offset of field `field` (in 4-byte words) of section header `index`.
pub fn section_field(image: &[u8], index: usize, field: usize) -> usize {
    let shoff = byteorder::LittleEndian::read_u32(&image[32..36]) as usize;
    shoff + index * 40 + field * 4
}
