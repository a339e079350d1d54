mod scanner;

pub mod common;
pub mod elf;
pub mod executable;
pub mod query;
pub mod report;
pub mod walker;

pub use common::{path_to_string, ScanError};
pub use executable::{Architecture, ExecutableInfo, ScanResults};
pub use query::{ScanParameters, ScanQuery, ScanTarget};

/// Scan the query's directory tree for ELF executables that depend on the
/// target libraries
pub fn scan(query: &ScanQuery) -> Result<ScanResults, ScanError> {
    let scanner = scanner::Scanner::new(query);
    scanner.run()
}
