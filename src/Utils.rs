/// Loading of periodic table data from flat files (plain text or JSON)
pub mod load_from_file;
/// One-shot logger initialization for binaries and examples
pub mod logger;
