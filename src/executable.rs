use multimap::MultiMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Machine architecture declared in an ELF header
///
/// Discriminants are the raw `e_machine` values, so the derived ordering is
/// the ascending machine-value order used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u16)]
pub enum Architecture {
    I386 = 3,
    Mips = 8,
    PowerPc = 20,
    PowerPc64 = 21,
    Arm = 40,
    X86_64 = 62,
    AArch64 = 183,
    RiscV = 243,
    Unknown = 0xffff,
}

impl Architecture {
    pub fn from_e_machine(e_machine: u16) -> Self {
        use goblin::elf::header;
        match e_machine {
            header::EM_386 => Architecture::I386,
            header::EM_MIPS => Architecture::Mips,
            header::EM_PPC => Architecture::PowerPc,
            header::EM_PPC64 => Architecture::PowerPc64,
            header::EM_ARM => Architecture::Arm,
            header::EM_X86_64 => Architecture::X86_64,
            header::EM_AARCH64 => Architecture::AArch64,
            header::EM_RISCV => Architecture::RiscV,
            _ => Architecture::Unknown,
        }
    }

    /// Stable name used in report headings
    pub fn name(self) -> &'static str {
        match self {
            Architecture::I386 => "i386",
            Architecture::Mips => "MIPS",
            Architecture::PowerPc => "PowerPC",
            Architecture::PowerPc64 => "PowerPC64",
            Architecture::Arm => "ARM",
            Architecture::X86_64 => "x86_64",
            Architecture::AArch64 => "AArch64",
            Architecture::RiscV => "RISC-V",
            Architecture::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An executable file that depends on at least one of the target libraries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableInfo {
    /// Path the file was enumerated under
    pub path: PathBuf,
    /// Architecture reported by the ELF header
    pub architecture: Architecture,
}

impl ExecutableInfo {
    pub fn new<P: AsRef<Path>>(path: P, architecture: Architecture) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            architecture,
        }
    }
}

/// Aggregate outcome of a scan: target library name -> dependent executables
///
/// A library appears as a key only if at least one executable matched it; an
/// executable appears under every target library it depends on.
#[derive(Debug, Clone, Default)]
pub struct ScanResults {
    index: MultiMap<String, ExecutableInfo>,
}

impl ScanResults {
    pub fn new() -> Self {
        Self {
            index: MultiMap::new(),
        }
    }

    pub fn record(&mut self, library: String, executable: ExecutableInfo) {
        self.index.insert(library, executable);
    }

    pub fn get(&self, library: &str) -> Option<&Vec<ExecutableInfo>> {
        self.index.get_vec(library)
    }

    pub fn contains(&self, library: &str) -> bool {
        self.index.contains_key(library)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ExecutableInfo>)> {
        self.index.iter_all()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of target libraries with at least one dependent executable
    pub fn library_count(&self) -> usize {
        self.index.len()
    }

    /// Total number of (library, executable) matches
    pub fn executable_count(&self) -> usize {
        self.index.iter_all().map(|(_, execs)| execs.len()).sum()
    }
}
