//! Low-level ELF file format access through the goblin library

use crate::common::ScanError;
use crate::executable::Architecture;
use fs_err as fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Magic signature opening every ELF file
pub const ELF_MAGIC: [u8; 4] = *b"\x7fELF";

/// Cheap pre-filter: does the file start with the ELF magic signature?
///
/// Reads only the first 4 bytes. Any I/O failure (missing file, permission
/// denied, race with deletion) counts as "not a candidate".
pub fn is_elf_candidate<P: AsRef<Path>>(path: P) -> bool {
    let mut magic = [0u8; 4];
    match fs::File::open(path.as_ref()) {
        Ok(mut file) => match file.read_exact(&mut magic) {
            Ok(()) => magic == ELF_MAGIC,
            Err(e) => {
                debug!("could not read magic bytes: {}", e);
                false
            }
        },
        Err(e) => {
            debug!("could not open candidate: {}", e);
            false
        }
    }
}

/// Owned buffer holding the bytes of a candidate file
pub struct ElfFileMap {
    path: PathBuf,
    content: Vec<u8>,
}

impl ElfFileMap {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        Ok(Self {
            path: PathBuf::from(path.as_ref()),
            content: fs::read(path.as_ref())?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outcome of parsing a candidate file
///
/// Distinguishes "parsed fine", "valid object of another format" and (via
/// the enclosing Result) "parse failure".
pub enum Inspection<'a> {
    Elf(ElfFile<'a>),
    NotElf,
}

/// A successfully parsed ELF file
pub struct ElfFile<'a> {
    elf: goblin::elf::Elf<'a>,
}

impl<'a> ElfFile<'a> {
    pub fn architecture(&self) -> Architecture {
        Architecture::from_e_machine(self.elf.header.e_machine)
    }

    /// Names of the shared libraries this file declares as DT_NEEDED
    ///
    /// No ordering guarantee.
    pub fn needed_libraries(&self) -> &[&'a str] {
        &self.elf.libraries
    }
}

pub fn inspect(filemap: &ElfFileMap) -> Result<Inspection<'_>, ScanError> {
    match goblin::Object::parse(&filemap.content)? {
        goblin::Object::Elf(elf) => Ok(Inspection::Elf(ElfFile { elf })),
        _ => Ok(Inspection::NotElf),
    }
}
