// Tests for recursive tree hashing

use std::fs;

use dirhash::hash::{Algorithm, DirHashError, TreeHasher};
use tempfile::tempdir;

#[test]
fn test_hash_single_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("test.txt"), b"hello world").unwrap();

    let (index, stats) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(
        index.get("test.txt").unwrap(),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.total_bytes, 11);
}

#[test]
fn test_hash_nested_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sub1/sub2")).unwrap();
    fs::write(dir.path().join("root.txt"), b"root").unwrap();
    fs::write(dir.path().join("sub1/a.txt"), b"a").unwrap();
    fs::write(dir.path().join("sub1/sub2/b.txt"), b"b").unwrap();

    let (index, _) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();

    assert_eq!(index.len(), 3);
    assert!(index.contains("root.txt"));
    assert!(index.contains("sub1/a.txt"));
    assert!(index.contains("sub1/sub2/b.txt"));
}

#[test]
fn test_keys_iterate_in_lexicographic_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("z.txt"), b"z").unwrap();
    fs::write(dir.path().join("a.txt"), b"a").unwrap();
    fs::write(dir.path().join("b/m.txt"), b"m").unwrap();

    let (index, _) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Md5)
        .unwrap();

    let keys: Vec<&str> = index.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a.txt", "b/m.txt", "z.txt"]);
}

#[test]
fn test_empty_directory_yields_empty_index() {
    let dir = tempdir().unwrap();

    let (index, stats) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();

    assert!(index.is_empty());
    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 0);
}

#[test]
fn test_missing_root_is_invalid() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = TreeHasher::new()
        .hash_tree(&missing, Algorithm::Sha256)
        .unwrap_err();
    match err {
        DirHashError::InvalidRoot { path } => assert_eq!(path, missing),
        other => panic!("expected InvalidRoot, got {:?}", other),
    }
}

#[test]
fn test_file_root_is_invalid() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"not a directory").unwrap();

    let err = TreeHasher::new()
        .hash_tree(&file, Algorithm::Sha256)
        .unwrap_err();
    assert!(matches!(err, DirHashError::InvalidRoot { .. }));
}

#[test]
fn test_idempotent_on_unchanged_tree() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("one.txt"), b"one").unwrap();
    fs::write(dir.path().join("nested/two.txt"), b"two").unwrap();

    let hasher = TreeHasher::new();
    let (first, _) = hasher.hash_tree(dir.path(), Algorithm::Sha256).unwrap();
    let (second, _) = hasher.hash_tree(dir.path(), Algorithm::Sha256).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("x/y")).unwrap();
    for i in 0..20 {
        fs::write(dir.path().join(format!("f{}.bin", i)), vec![i as u8; 100]).unwrap();
    }
    fs::write(dir.path().join("x/y/deep.bin"), b"deep").unwrap();

    let (sequential, _) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();
    let (parallel, stats) = TreeHasher::new()
        .with_parallel(true)
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(stats.files_processed, 21);
}

#[test]
fn test_one_entry_per_regular_file() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
    fs::write(dir.path().join("a/1.txt"), b"1").unwrap();
    fs::write(dir.path().join("a/b/2.txt"), b"2").unwrap();
    fs::write(dir.path().join("a/b/c/3.txt"), b"3").unwrap();

    let (index, stats) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha1)
        .unwrap();

    // BTreeMap keys are unique by construction; the counts must agree
    assert_eq!(index.len(), 3);
    assert_eq!(stats.files_processed, 3);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_skipped() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), b"real").unwrap();
    symlink(dir.path().join("real.txt"), dir.path().join("link.txt")).unwrap();
    // Dangling link must not fail the scan either
    symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

    let (index, stats) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();

    assert_eq!(index.len(), 1);
    assert!(index.contains("real.txt"));
    assert!(!index.contains("link.txt"));
    assert_eq!(stats.files_processed, 1);
}

#[test]
fn test_algorithm_changes_digests_not_keys() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("data.txt"), b"content").unwrap();

    let (sha, _) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Sha256)
        .unwrap();
    let (md5, _) = TreeHasher::new()
        .hash_tree(dir.path(), Algorithm::Md5)
        .unwrap();

    assert_eq!(sha.len(), md5.len());
    assert!(sha.contains("data.txt"));
    assert!(md5.contains("data.txt"));
    assert_ne!(sha.get("data.txt"), md5.get("data.txt"));
}
