// dirhash binary
// Hashes a directory tree and optionally compares it against a second tree

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use dirhash::hash::{
    compare, Algorithm, CompareReport, DirHashError, HashIndex, ScanStats, TreeHasher,
};

/// Hash every file under a directory tree and compare trees
#[derive(Parser)]
#[command(name = "dirhash")]
#[command(about = "Recursive directory hashing and tree comparison")]
struct Cli {
    /// Directory to hash
    directory: PathBuf,

    /// Hash algorithm
    #[arg(short, long, value_enum, default_value = "sha256")]
    algorithm: Algorithm,

    /// Second directory to compare against
    #[arg(short, long)]
    compare: Option<PathBuf>,

    /// Emit per-file diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Hash files on multiple threads
    #[arg(long)]
    parallel: bool,

    /// Emit results as a JSON document instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Validate both roots before any output is produced
    validate_root(&cli.directory)?;
    if let Some(ref compare_dir) = cli.compare {
        validate_root(compare_dir)?;
    }

    let hasher = TreeHasher::new()
        .with_parallel(cli.parallel)
        .with_verbose(cli.verbose);

    let (index, stats) = hasher.hash_tree(&cli.directory, cli.algorithm)?;

    let report = match cli.compare {
        Some(ref compare_dir) => {
            let (right_index, right_stats) = hasher.hash_tree(compare_dir, cli.algorithm)?;
            if cli.verbose {
                print_stats(compare_dir, &right_stats);
            }
            Some(compare(
                &cli.directory.display().to_string(),
                &index,
                &compare_dir.display().to_string(),
                &right_index,
            ))
        }
        None => None,
    };

    if cli.verbose {
        print_stats(&cli.directory, &stats);
    }

    if cli.json {
        print_json(cli, &index, &stats, report.as_ref())?;
    } else {
        print_text(cli, &index, report.as_ref());
    }

    Ok(())
}

fn validate_root(path: &Path) -> Result<(), DirHashError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(DirHashError::InvalidRoot {
            path: path.to_path_buf(),
        }),
    }
}

fn print_text(cli: &Cli, index: &HashIndex, report: Option<&CompareReport>) {
    println!(
        "{} hashes for {}:",
        cli.algorithm.name(),
        cli.directory.display()
    );
    for (path, digest) in index.iter() {
        println!("{} : {}", path, digest);
    }

    if let Some(report) = report {
        report.display();
    }
}

fn print_json(
    cli: &Cli,
    index: &HashIndex,
    stats: &ScanStats,
    report: Option<&CompareReport>,
) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        metadata: Metadata,
        algorithm: String,
        directory: String,
        files: &'a HashIndex,
        stats: &'a ScanStats,
        #[serde(skip_serializing_if = "Option::is_none")]
        comparison: Option<&'a CompareReport>,
    }

    #[derive(Serialize)]
    struct Metadata {
        timestamp: String,
    }

    let output = JsonOutput {
        metadata: Metadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
        algorithm: cli.algorithm.name().to_string(),
        directory: cli.directory.display().to_string(),
        files: index,
        stats,
        comparison: report,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_stats(root: &Path, stats: &ScanStats) {
    eprintln!(
        "Hashed {} file(s) under {} ({} failed, {} bytes, {:.2}s)",
        stats.files_processed,
        root.display(),
        stats.files_failed,
        stats.total_bytes,
        stats.duration.as_secs_f64()
    );
}
