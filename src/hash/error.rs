// Centralized error handling module
// Context-rich error types for tree hashing and comparison

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for the directory hashing tool
#[derive(Debug)]
pub enum DirHashError {
    /// A supplied root path does not exist or is not a directory
    InvalidRoot { path: PathBuf },

    /// Per-file errors raised during traversal (non-fatal there)
    FileNotFound { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    Io { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Algorithm identifier outside the supported set
    UnsupportedAlgorithm { name: String },
}

impl fmt::Display for DirHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DirHashError::InvalidRoot { path } => {
                writeln!(f, "Not a directory: {}", path.display())?;
                write!(f, "Suggestion: Check that the path exists and is a directory")
            }
            DirHashError::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            DirHashError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} {}", operation, path.display())
            }
            DirHashError::Io { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} {}: {}", operation, p.display(), source)
                } else {
                    write!(f, "I/O error while {}: {}", operation, source)
                }
            }
            DirHashError::UnsupportedAlgorithm { name } => {
                writeln!(f, "Unsupported hash algorithm: {}", name)?;
                write!(f, "Suggestion: Use one of md5, sha1, sha256, sha384, sha512")
            }
        }
    }
}

impl std::error::Error for DirHashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirHashError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl DirHashError {
    /// Create an error from an io::Error with context about the operation
    /// and the path it touched, mapping well-known kinds to typed variants
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(p)) => DirHashError::FileNotFound { path: p },
            (io::ErrorKind::PermissionDenied, Some(p)) => DirHashError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            (_, path) => DirHashError::Io {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }
}

impl From<io::Error> for DirHashError {
    fn from(err: io::Error) -> Self {
        DirHashError::from_io_error(err, "unknown operation", None)
    }
}
