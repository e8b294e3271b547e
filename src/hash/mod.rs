// Hash core
// Tree hashing and hash-set comparison for directory trees

pub mod algorithm;
pub mod compare;
pub mod compute;
pub mod error;
pub mod path_utils;
pub mod walk;

// Re-export commonly used types for convenience
pub use algorithm::{Algorithm, Hasher};
pub use compare::{compare, CompareReport, EntryStatus, ReportEntry};
pub use compute::HashComputer;
pub use error::DirHashError;
pub use walk::{HashIndex, ScanStats, TreeHasher};
