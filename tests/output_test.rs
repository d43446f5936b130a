//! Output writer tests
//!
//! Verifies the JSON document shape and the temp-file-then-rename write.

use std::collections::BTreeMap;
use std::fs;

use netbox_sd::config::OutputTarget;
use netbox_sd::discovery::TargetGroup;
use netbox_sd::output::write_targets;

fn sample_group() -> TargetGroup {
    let mut labels = BTreeMap::new();
    labels.insert("__port__".to_string(), "10000".to_string());
    labels.insert("__meta_netbox_name".to_string(), "edge-router-1".to_string());
    TargetGroup {
        targets: vec!["192.0.2.5:10000".to_string()],
        labels,
    }
}

#[test]
fn test_empty_target_list_writes_empty_array() {
    // Given: No discovered targets
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("targets.json");

    // When: Writing to a file
    write_targets(&[], &OutputTarget::File(path.clone())).expect("write should succeed");

    // Then: The file holds the literal empty array plus a trailing newline
    let content = fs::read_to_string(&path).expect("read back");
    assert_eq!(content, "[]\n");
}

#[test]
fn test_document_is_valid_json_with_contract_fields() {
    // Given: One discovered target
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("targets.json");

    // When: Writing it
    write_targets(&[sample_group()], &OutputTarget::File(path.clone())).unwrap();

    // Then: The document round-trips and keeps the targets/labels shape
    let content = fs::read_to_string(&path).unwrap();
    let parsed: Vec<TargetGroup> = serde_json::from_str(&content).expect("valid JSON");
    assert_eq!(parsed, vec![sample_group()]);

    // Then: Field order is part of the contract - targets before labels
    let targets_at = content.find("\"targets\"").expect("targets key");
    let labels_at = content.find("\"labels\"").expect("labels key");
    assert!(targets_at < labels_at);
}

#[test]
fn test_no_temp_file_left_behind() {
    // Given: A successful write
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("targets.json");

    write_targets(&[sample_group()], &OutputTarget::File(path.clone())).unwrap();

    // Then: The temp sibling was renamed away
    assert!(path.exists());
    assert!(!dir.path().join("targets.json.tmp").exists());
}

#[test]
fn test_rewrite_replaces_previous_document() {
    // Given: An existing document at the output path
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("targets.json");
    write_targets(&[sample_group()], &OutputTarget::File(path.clone())).unwrap();

    // When: A later run discovers nothing
    write_targets(&[], &OutputTarget::File(path.clone())).unwrap();

    // Then: The file was atomically replaced
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
}

#[test]
fn test_write_to_missing_directory_fails_and_leaves_no_file() {
    // Given: An output path in a directory that does not exist
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("targets.json");

    // When: Writing
    let result = write_targets(&[sample_group()], &OutputTarget::File(path.clone()));

    // Then: The write fails and nothing appears at the final path
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_failed_write_leaves_prior_file_untouched() {
    // Given: A prior document, then the output path turned into a directory
    // so the temp write itself still works but the rename cannot land
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("targets.json");
    write_targets(&[sample_group()], &OutputTarget::File(path.clone())).unwrap();
    let prior = fs::read_to_string(&path).unwrap();

    let blocked = dir.path().join("blocked");
    fs::create_dir(&blocked).unwrap();
    let inner = blocked.join("x");
    fs::create_dir(&inner).unwrap();

    let result = write_targets(&[], &OutputTarget::File(inner.clone()));

    // Then: The rename fails, and the unrelated prior document is intact
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), prior);
}
