use filedrift::{
    digest, load, save, ChecksumRecord, Digest, DriftDetector, DriftState, FileDriftError,
    FileStorage,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
const HELLO_BANG_SHA256: &str = "ce06092fb948d9ffac7d1a376e404b26b7575bcc11ee05a4615fef4fec3a308b";

fn setup(content: &[u8]) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("file.txt");
    let checksum = dir.path().join("checksum.json");
    fs::write(&target, content).unwrap();
    (dir, target, checksum)
}

fn run_check(target: &Path, checksum: &Path) -> filedrift::Result<filedrift::ChangeDecision> {
    DriftDetector::new(FileStorage::new(checksum)).check_file(target)
}

#[test]
fn test_hello_scenario_across_runs() {
    let (_dir, target, checksum) = setup(b"hello");

    let first = run_check(&target, &checksum).unwrap();
    assert_eq!(first.state, DriftState::Baseline);
    assert!(!first.changed);
    assert_eq!(first.digest.to_hex(), HELLO_SHA256);

    let stored = load(&FileStorage::new(&checksum)).unwrap().unwrap();
    assert_eq!(stored.digest(), Some(first.digest.as_bytes()));

    let second = run_check(&target, &checksum).unwrap();
    assert_eq!(second.state, DriftState::Unchanged);
    assert!(!second.changed);

    fs::write(&target, b"hello!").unwrap();
    let third = run_check(&target, &checksum).unwrap();
    assert_eq!(third.state, DriftState::Changed);
    assert!(third.changed);
    assert_eq!(third.digest.to_hex(), HELLO_BANG_SHA256);

    let stored = load(&FileStorage::new(&checksum)).unwrap().unwrap();
    assert_eq!(stored.digest(), Some(digest(b"hello!").as_bytes()));

    let fourth = run_check(&target, &checksum).unwrap();
    assert_eq!(fourth.state, DriftState::Unchanged);
}

#[test]
fn test_empty_checksum_file_is_first_run() {
    let (_dir, target, checksum) = setup(b"hello");
    fs::write(&checksum, b"").unwrap();

    let decision = run_check(&target, &checksum).unwrap();
    assert_eq!(decision.state, DriftState::Baseline);
}

#[test]
fn test_record_with_null_hash_is_baseline() {
    let (_dir, target, checksum) = setup(b"hello");
    fs::write(&checksum, br#"{"hash":null}"#).unwrap();

    let decision = run_check(&target, &checksum).unwrap();
    assert_eq!(decision.state, DriftState::Baseline);
    assert!(!decision.changed);
}

#[test]
fn test_reads_existing_base64_record() {
    let (_dir, target, checksum) = setup(b"hello");
    fs::write(&checksum, br#"{"hash":"LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="}"#).unwrap();

    let decision = run_check(&target, &checksum).unwrap();
    assert_eq!(decision.state, DriftState::Unchanged);
}

#[test]
fn test_corrupt_record_is_reported_and_preserved() {
    let (_dir, target, checksum) = setup(b"hello");
    fs::write(&checksum, b"\x00\x01garbage").unwrap();

    let err = run_check(&target, &checksum).unwrap_err();
    assert!(matches!(err, FileDriftError::CorruptRecord { .. }));
    assert_eq!(fs::read(&checksum).unwrap(), b"\x00\x01garbage");
}

#[test]
fn test_missing_target_produces_no_record() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("absent.txt");
    let checksum = dir.path().join("checksum.json");

    let err = run_check(&target, &checksum).unwrap_err();
    assert!(matches!(err, FileDriftError::ContentRead { .. }));
    assert!(err.to_string().contains("absent.txt"));
    assert!(!checksum.exists());
}

#[test]
fn test_unwritable_checksum_location() {
    let (dir, target, _) = setup(b"hello");
    let checksum = dir.path().join("no_such_dir").join("checksum.json");

    let err = run_check(&target, &checksum).unwrap_err();
    assert!(matches!(err, FileDriftError::Storage { .. }));
}

#[test]
fn test_save_load_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(dir.path().join("checksum.json"));

    for record in [
        ChecksumRecord::new(Digest::from_bytes([0u8; 32])),
        ChecksumRecord::new(Digest::from_bytes([0xffu8; 32])),
        ChecksumRecord::new(digest(b"payload")),
    ] {
        save(&mut storage, &record).unwrap();
        let loaded = load(&storage).unwrap().unwrap();
        assert_eq!(loaded.digest(), record.digest());
    }
}
