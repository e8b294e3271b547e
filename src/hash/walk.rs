// Tree hashing module
// Recursive directory traversal and per-file hash computation

use std::collections::BTreeMap;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::algorithm::Algorithm;
use super::compute::HashComputer;
use super::error::DirHashError;
use super::path_utils;

/// Mapping from root-relative path to hex digest for one directory tree
///
/// Built in a single pass by [`TreeHasher::hash_tree`]; there are no public
/// mutators, so the mapping is immutable once returned. Keys are unique by
/// construction (each regular file is visited exactly once) and iteration
/// is in byte-wise lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct HashIndex(BTreeMap<String, String>);

impl HashIndex {
    fn insert(&mut self, key: String, digest: String) {
        self.0.insert(key, digest);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in lexicographic key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Statistics collected during one tree hashing pass
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_bytes: u64,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

// Helper function to serialize Duration as seconds
fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Per-file result of the hashing stage
enum FileOutcome {
    Hashed { key: String, digest: String, size: u64 },
    Failed,
}

/// Engine that hashes every regular file under a directory root
///
/// Symbolic links and other non-regular entries are skipped during
/// traversal; the walk never follows links, so link cycles cannot occur.
pub struct TreeHasher {
    computer: HashComputer,
    parallel: bool,
    verbose: bool,
}

impl TreeHasher {
    /// Create a new TreeHasher with default settings (sequential, quiet)
    pub fn new() -> Self {
        Self {
            computer: HashComputer::new(),
            parallel: false,
            verbose: false,
        }
    }

    /// Hash distinct files on rayon workers instead of one by one
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Emit one stderr line per file visited, hashed, and failed
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Hash every regular file under `root` with the given algorithm
    ///
    /// Returns the relative-path-to-digest mapping together with scan
    /// statistics. Individual unreadable files are reported as warnings on
    /// stderr and excluded from the mapping; only an invalid root is fatal.
    pub fn hash_tree(
        &self,
        root: &Path,
        algorithm: Algorithm,
    ) -> Result<(HashIndex, ScanStats), DirHashError> {
        let start_time = Instant::now();

        match fs::metadata(root) {
            Ok(metadata) if metadata.is_dir() => {}
            _ => {
                return Err(DirHashError::InvalidRoot {
                    path: root.to_path_buf(),
                })
            }
        }

        // Canonicalize root once for consistent relative key computation
        let canonical_root = root.canonicalize().map_err(|e| {
            DirHashError::from_io_error(e, "scanning directory", Some(root.to_path_buf()))
        })?;

        let mut files = Vec::new();
        self.collect_files_recursive(&canonical_root, &mut files);

        // Progress bar only when interactive and not drowned out by -v
        let pb = if !self.verbose && std::io::stderr().is_terminal() {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let outcomes: Vec<FileOutcome> = if self.parallel {
            files
                .par_iter()
                .map(|path| self.hash_one(path, &canonical_root, algorithm, pb.as_ref()))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.hash_one(path, &canonical_root, algorithm, pb.as_ref()))
                .collect()
        };

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        // Join per-file outcomes into the final mapping on this thread;
        // keys come from distinct paths, so no insert can collide
        let mut index = HashIndex::default();
        let mut files_processed = 0;
        let mut files_failed = 0;
        let mut total_bytes = 0u64;

        for outcome in outcomes {
            match outcome {
                FileOutcome::Hashed { key, digest, size } => {
                    index.insert(key, digest);
                    files_processed += 1;
                    total_bytes += size;
                }
                FileOutcome::Failed => files_failed += 1,
            }
        }

        Ok((
            index,
            ScanStats {
                files_processed,
                files_failed,
                total_bytes,
                duration: start_time.elapsed(),
            },
        ))
    }

    /// Hash a single collected file, converting any failure into a warning
    fn hash_one(
        &self,
        path: &Path,
        canonical_root: &Path,
        algorithm: Algorithm,
        pb: Option<&ProgressBar>,
    ) -> FileOutcome {
        if self.verbose {
            eprintln!("Visiting {}", path.display());
        }

        let key = match path_utils::relative_key(path, canonical_root) {
            Some(key) => key,
            None => {
                eprintln!(
                    "Warning: Cannot compute relative path for {}",
                    path.display()
                );
                if let Some(pb) = pb {
                    pb.inc(1);
                }
                return FileOutcome::Failed;
            }
        };

        let outcome = match self.computer.compute_hash(path, algorithm) {
            Ok(digest) => {
                if self.verbose {
                    eprintln!("Hashed {}", key);
                }
                let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                FileOutcome::Hashed { key, digest, size }
            }
            Err(e) => {
                eprintln!("Warning: Failed to hash {}: {}", path.display(), e);
                FileOutcome::Failed
            }
        };

        if let Some(pb) = pb {
            pb.inc(1);
        }
        outcome
    }

    /// Recursively collect all regular files under `dir`
    ///
    /// Unreadable directories and entries are reported as warnings and
    /// skipped; the walk itself never fails.
    fn collect_files_recursive(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Warning: Cannot read directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    eprintln!("Warning: Cannot read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // file_type() does not follow symlinks
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    eprintln!("Warning: Cannot read metadata for {}: {}", path.display(), e);
                    continue;
                }
            };

            if file_type.is_file() {
                files.push(path);
            } else if file_type.is_dir() {
                self.collect_files_recursive(&path, files);
            }
            // Skip symbolic links and other special files
        }
    }
}

impl Default for TreeHasher {
    fn default() -> Self {
        Self::new()
    }
}
