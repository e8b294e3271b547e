// Hash computation module
// Streams file bytes through the selected algorithm

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use super::algorithm::{Algorithm, Hasher};
use super::error::DirHashError;

// Files above this size are read in buffered chunks instead of being mapped
const MMAP_THRESHOLD: u64 = 2 * 1024 * 1024 * 1024; // 2GB

/// Hash computer with streaming I/O
pub struct HashComputer {
    buffer_size: usize,
}

impl HashComputer {
    /// Create a new HashComputer with default buffer size (1MB)
    pub fn new() -> Self {
        Self {
            buffer_size: 1024 * 1024,
        }
    }

    /// Create a new HashComputer with custom buffer size
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Compute the hex-encoded digest of a file's bytes
    ///
    /// For non-empty files smaller than 2GB the file is memory mapped to
    /// avoid the kernel-to-userspace copy; larger (and empty) files go
    /// through buffered reads with a fixed-size chunk buffer, so the whole
    /// file is never held in memory at once.
    pub fn compute_hash(&self, path: &Path, algorithm: Algorithm) -> Result<String, DirHashError> {
        let mut hasher = algorithm.hasher();

        let file = File::open(path).map_err(|e| {
            DirHashError::from_io_error(e, "reading", Some(path.to_path_buf()))
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| {
                DirHashError::from_io_error(e, "reading metadata", Some(path.to_path_buf()))
            })?
            .len();

        if file_size > 0 && file_size < MMAP_THRESHOLD {
            match unsafe { Mmap::map(&file) } {
                Ok(mmap) => hasher.update(&mmap[..]),
                Err(_) => {
                    // Fall back to buffered reading if mmap fails
                    self.hash_with_buffered_io(&mut hasher, file, path)?;
                }
            }
        } else {
            self.hash_with_buffered_io(&mut hasher, file, path)?;
        }

        Ok(bytes_to_hex(&hasher.finalize()))
    }

    /// Compute the hex-encoded digest of an in-memory byte slice
    pub fn compute_hash_bytes(&self, data: &[u8], algorithm: Algorithm) -> String {
        let mut hasher = algorithm.hasher();
        hasher.update(data);
        bytes_to_hex(&hasher.finalize())
    }

    fn hash_with_buffered_io(
        &self,
        hasher: &mut Box<dyn Hasher>,
        mut file: File,
        path: &Path,
    ) -> Result<(), DirHashError> {
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let bytes_read = file.read(&mut buffer).map_err(|e| {
                DirHashError::from_io_error(e, "reading", Some(path.to_path_buf()))
            })?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(())
    }
}

impl Default for HashComputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert raw digest bytes to a lowercase hexadecimal string
fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
