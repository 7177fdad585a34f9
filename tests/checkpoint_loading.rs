//! Integration tests for checkpoint loading and the validation gate

use finality_gate::loader::{
    load_checkpoints_from_json, CheckpointLoader, HashFile, HashLine, NoResolver, StaticResolver,
};
use finality_gate::params::{NetworkParams, MAINNET, TESTNET};
use finality_gate::shared::SharedCheckpoints;
use finality_gate::{BlockHash, Checkpoint, CheckpointError, CheckpointStore, NetworkType};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Deterministic fake block hash for a label
fn block_hash(label: &str) -> BlockHash {
    let digest: [u8; 32] = Sha256::digest(label.as_bytes()).into();
    BlockHash::new(digest)
}

fn write_hash_file(path: &Path, lines: &[(u64, BlockHash)]) -> Result<(), Box<dyn std::error::Error>> {
    let file = HashFile {
        hashlines: lines
            .iter()
            .map(|(height, hash)| HashLine {
                height: *height,
                hash: *hash,
            })
            .collect(),
    };
    file.write(path)?;
    Ok(())
}

/// Store seeded with synthetic defaults topping out at height 500
fn store_with_defaults() -> CheckpointStore {
    CheckpointStore::from_checkpoints([
        Checkpoint::new(100, block_hash("default-100")),
        Checkpoint::new(500, block_hash("default-500")),
    ])
    .unwrap()
}

#[test]
fn test_file_loader_downgrade_protection() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    write_hash_file(
        &path,
        &[(300, block_hash("file-300")), (600, block_hash("file-600"))],
    )?;

    let mut store = store_with_defaults();
    let report = load_checkpoints_from_json(&mut store, &path)?;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.added, 1);
    assert_eq!(store.lookup(300), None);
    assert_eq!(store.lookup(600), Some(block_hash("file-600")));
    assert_eq!(store.highest_height(), Some(600));
    Ok(())
}

#[test]
fn test_file_loader_cannot_override_default_pin() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    write_hash_file(&path, &[(100, block_hash("attacker-100"))])?;

    let mut store = store_with_defaults();
    load_checkpoints_from_json(&mut store, &path)?;
    assert_eq!(store.lookup(100), Some(block_hash("default-100")));
    Ok(())
}

#[test]
fn test_file_loader_into_empty_store_takes_everything() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    write_hash_file(&path, &[(1, block_hash("a")), (2, block_hash("b"))])?;

    let mut store = CheckpointStore::new();
    let report = load_checkpoints_from_json(&mut store, &path)?;
    assert_eq!(report.added, 2);
    assert_eq!(store.len(), 2);
    Ok(())
}

#[test]
fn test_missing_file_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let mut store = store_with_defaults();
    let report = load_checkpoints_from_json(&mut store, &temp_dir.path().join("absent.json"))?;
    assert_eq!(report.added + report.skipped + report.already_present, 0);
    assert_eq!(store.len(), 2);
    Ok(())
}

#[test]
fn test_corrupt_file_fails_the_source() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");

    fs::write(&path, "{ not json")?;
    let mut store = store_with_defaults();
    assert!(matches!(
        load_checkpoints_from_json(&mut store, &path),
        Err(CheckpointError::Json(_))
    ));

    // one bad hash anywhere poisons the whole document
    let good = block_hash("file-900").to_hex();
    fs::write(
        &path,
        format!(
            r#"{{"hashlines":[{{"height":900,"hash":"{}"}},{{"height":901,"hash":"xyz"}}]}}"#,
            good
        ),
    )?;
    assert!(load_checkpoints_from_json(&mut store, &path).is_err());
    assert_eq!(store.lookup(900), None);
    Ok(())
}

#[test]
fn test_file_with_internal_conflict_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    write_hash_file(
        &path,
        &[(700, block_hash("one")), (700, block_hash("two"))],
    )?;

    let mut store = store_with_defaults();
    let err = load_checkpoints_from_json(&mut store, &path).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(store.lookup(700), Some(block_hash("one")));
    Ok(())
}

#[test]
fn test_orchestrator_dns_failure_keeps_file_entries() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    write_hash_file(&path, &[(600, block_hash("file-600"))])?;

    // the DNS source pins 100 to a different hash than the defaults
    let resolver = StaticResolver::new([format!("100:{}", block_hash("dns-100").to_hex())]);
    let loader = CheckpointLoader::new(NetworkType::Mainnet)
        .with_dns_domains(vec!["checkpoints.example.org".to_string()])
        .with_resolver(Box::new(resolver));

    let mut store = store_with_defaults();
    assert!(!loader.load_new_checkpoints(&mut store, &path, true));
    assert_eq!(store.lookup(600), Some(block_hash("file-600")));
    assert_eq!(store.lookup(100), Some(block_hash("default-100")));
    Ok(())
}

#[test]
fn test_orchestrator_runs_dns_after_file_failure() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    fs::write(&path, "garbage")?;

    let resolver = StaticResolver::new([format!("800:{}", block_hash("dns-800").to_hex())]);
    let loader = CheckpointLoader::new(NetworkType::Testnet)
        .with_dns_domains(vec!["checkpoints.example.org".to_string()])
        .with_resolver(Box::new(resolver));

    let mut store = CheckpointStore::new();
    assert!(!loader.load_new_checkpoints(&mut store, &path, true));
    assert_eq!(store.lookup(800), Some(block_hash("dns-800")));
    Ok(())
}

#[test]
fn test_orchestrator_dns_only_when_requested() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("absent.json");

    let resolver = StaticResolver::new([format!("5:{}", block_hash("dns-5").to_hex())]);
    let loader = CheckpointLoader::new(NetworkType::Testnet)
        .with_dns_domains(vec!["checkpoints.example.org".to_string()])
        .with_resolver(Box::new(resolver));

    let mut store = CheckpointStore::new();
    assert!(loader.load_new_checkpoints(&mut store, &path, false));
    assert!(store.is_empty());

    assert!(loader.load_new_checkpoints(&mut store, &path, true));
    assert_eq!(store.lookup(5), Some(block_hash("dns-5")));
    Ok(())
}

#[test]
fn test_orchestrator_unavailable_dns_is_success() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let loader = CheckpointLoader::new(NetworkType::Stagenet)
        .with_dns_domains(vec!["checkpoints.example.org".to_string()])
        .with_resolver(Box::new(NoResolver));

    let mut store = CheckpointStore::with_params(NetworkParams::for_network(NetworkType::Stagenet))?;
    assert!(loader.load_new_checkpoints(&mut store, &temp_dir.path().join("absent.json"), true));
    assert!(store.is_empty());
    Ok(())
}

#[test]
fn test_mainnet_defaults_gate_real_history() -> Result<(), Box<dyn std::error::Error>> {
    let store = CheckpointStore::with_params(&MAINNET)?;
    let gate = store.gate();

    let pinned = BlockHash::from_hex("1d69279e55a88120db679e7ecceb5415424623422609d86f6a2fbdb892a55b93")?;
    let check = gate.check_block(100000, &pinned);
    assert!(check.accepted && check.is_checkpoint);
    assert!(!gate.check_block(100000, &block_hash("fake")).accepted);

    // tip at 120000: the nearest pin is 110000
    assert!(!gate.alternative_block_allowed(120000, 110000));
    assert!(gate.alternative_block_allowed(120000, 110001));
    assert!(store.in_checkpoint_zone(3619107));
    assert!(!store.in_checkpoint_zone(3619108));
    Ok(())
}

#[test]
fn test_export_then_load_into_other_network() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("exported.json");

    let source = CheckpointStore::with_params(&MAINNET)?;
    HashFile::from_store(&source).write(&path)?;

    let mut target = CheckpointStore::with_params(&TESTNET)?;
    let report = load_checkpoints_from_json(&mut target, &path)?;
    assert_eq!(report.added, 27);
    assert!(target.check_conflicts(&source).is_ok());
    assert_eq!(target, source);
    Ok(())
}

#[test]
fn test_shared_store_loads_under_one_guard() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("checkpoints.json");
    write_hash_file(&path, &[(600, block_hash("file-600"))])?;

    let shared = SharedCheckpoints::new(store_with_defaults());
    let loader = CheckpointLoader::new(NetworkType::Mainnet);
    assert!(shared.load_new_checkpoints(&loader, &path, false));

    assert_eq!(shared.highest_height(), Some(600));
    assert!(!shared.alternative_block_allowed(650, 600));
    assert!(shared.alternative_block_allowed(650, 601));
    Ok(())
}
