//! Hand-assembled ELF64 images for exercising the scan pipeline on real,
//! parseable binaries without shipping fixture files.
#![allow(dead_code)]

pub const EM_ARM: u16 = 40;
pub const EM_X86_64: u16 = 62;
pub const EM_AARCH64: u16 = 183;

/// A little-endian ELF64 image declaring the given libraries as DT_NEEDED
///
/// The image holds the ELF header, a PT_LOAD segment mapping the whole file
/// at virtual address 0 (so virtual addresses equal file offsets), a
/// PT_DYNAMIC segment, the dynamic entries and the dynamic string table.
pub fn minimal_dynamic_elf(e_machine: u16, libraries: &[&str]) -> Vec<u8> {
    const EHSIZE: usize = 64;
    const PHENTSIZE: usize = 56;
    const PHNUM: usize = 2;
    const DYN_ENTRY: usize = 16;

    let mut strtab = vec![0u8];
    let mut name_offsets = Vec::with_capacity(libraries.len());
    for library in libraries {
        name_offsets.push(strtab.len() as u64);
        strtab.extend_from_slice(library.as_bytes());
        strtab.push(0);
    }

    let dyn_offset = EHSIZE + PHENTSIZE * PHNUM;
    let dyn_size = (libraries.len() + 3) * DYN_ENTRY;
    let strtab_offset = dyn_offset + dyn_size;
    let total = strtab_offset + strtab.len();

    let mut image = Vec::with_capacity(total);

    image.extend_from_slice(b"\x7fELF");
    image.push(2); // ELFCLASS64
    image.push(1); // little endian
    image.push(1); // EV_CURRENT
    image.extend_from_slice(&[0u8; 9]); // OS ABI, ABI version, padding
    image.extend_from_slice(&3u16.to_le_bytes()); // e_type: ET_DYN
    image.extend_from_slice(&e_machine.to_le_bytes());
    image.extend_from_slice(&1u32.to_le_bytes()); // e_version
    image.extend_from_slice(&0u64.to_le_bytes()); // e_entry
    image.extend_from_slice(&(EHSIZE as u64).to_le_bytes()); // e_phoff
    image.extend_from_slice(&0u64.to_le_bytes()); // e_shoff
    image.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    image.extend_from_slice(&(EHSIZE as u16).to_le_bytes());
    image.extend_from_slice(&(PHENTSIZE as u16).to_le_bytes());
    image.extend_from_slice(&(PHNUM as u16).to_le_bytes());
    image.extend_from_slice(&0u16.to_le_bytes()); // e_shentsize
    image.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    image.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

    // PT_LOAD mapping the whole file
    push_program_header(&mut image, 1, 0, total as u64, 0x1000);
    // PT_DYNAMIC
    push_program_header(&mut image, 2, dyn_offset as u64, dyn_size as u64, 8);

    for name_offset in &name_offsets {
        push_dyn(&mut image, 1, *name_offset); // DT_NEEDED
    }
    push_dyn(&mut image, 5, strtab_offset as u64); // DT_STRTAB
    push_dyn(&mut image, 10, strtab.len() as u64); // DT_STRSZ
    push_dyn(&mut image, 0, 0); // DT_NULL

    image.extend_from_slice(&strtab);
    assert_eq!(image.len(), total);
    image
}

/// Starts with the ELF magic but cannot be parsed
pub fn corrupt_elf() -> Vec<u8> {
    let mut image = b"\x7fELF".to_vec();
    image.extend_from_slice(&[0xff; 28]);
    image
}

fn push_program_header(image: &mut Vec<u8>, p_type: u32, offset: u64, size: u64, align: u64) {
    image.extend_from_slice(&p_type.to_le_bytes());
    image.extend_from_slice(&4u32.to_le_bytes()); // PF_R
    image.extend_from_slice(&offset.to_le_bytes()); // p_offset
    image.extend_from_slice(&offset.to_le_bytes()); // p_vaddr
    image.extend_from_slice(&offset.to_le_bytes()); // p_paddr
    image.extend_from_slice(&size.to_le_bytes()); // p_filesz
    image.extend_from_slice(&size.to_le_bytes()); // p_memsz
    image.extend_from_slice(&align.to_le_bytes());
}

fn push_dyn(image: &mut Vec<u8>, d_tag: u64, d_val: u64) {
    image.extend_from_slice(&d_tag.to_le_bytes());
    image.extend_from_slice(&d_val.to_le_bytes());
}
