//! Property-based tests using proptest
//!
//! Tests that verify properties hold for arbitrary inputs.

use std::collections::BTreeMap;

use netbox_sd::discovery::{bare_ip, expand_target, parse_overrides};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_bare_ip_never_contains_a_slash(address in "[0-9a-f.:]{1,40}(/[0-9]{1,3})?") {
        // Given: Any address-ish string, with or without a prefix length
        // When: Stripping the prefix
        let stripped = bare_ip(&address);

        // Then: No slash survives and the result prefixes the input
        prop_assert!(!stripped.contains('/'));
        prop_assert!(address.starts_with(stripped));
    }

    #[test]
    fn test_override_values_always_win(
        key in "[a-z_]{1,20}",
        base_value in "[a-zA-Z0-9]{1,20}",
        override_value in "[a-zA-Z0-9]{1,20}",
    ) {
        // Given: A base set and an override sharing one key
        let mut base = BTreeMap::new();
        base.insert(key.clone(), base_value);
        let mut overrides = BTreeMap::new();
        overrides.insert(key.clone(), override_value.clone());

        // When: Expanding the target
        let group = expand_target(&base, overrides, "192.0.2.1", 10000);

        // Then: The override value is what survives
        prop_assert_eq!(group.labels.get(&key), Some(&override_value));
    }

    #[test]
    fn test_base_labels_survive_disjoint_merges(
        base_key in "[a-z]{1,10}",
        override_key in "[A-Z]{1,10}",
        value in "[a-zA-Z0-9]{1,20}",
    ) {
        // Given: Base and override sets with disjoint keys (case-split
        // generators cannot collide)
        let mut base = BTreeMap::new();
        base.insert(base_key.clone(), value.clone());
        let mut overrides = BTreeMap::new();
        overrides.insert(override_key.clone(), value.clone());

        let group = expand_target(&base, overrides, "192.0.2.1", 10000);

        // Then: Both keys are present in the merged set
        prop_assert!(group.labels.contains_key(&base_key));
        prop_assert!(group.labels.contains_key(&override_key));
    }

    #[test]
    fn test_port_override_forms_the_target_suffix(port in 1u16..u16::MAX) {
        // Given: An override replacing the port label
        let base = BTreeMap::new();
        let mut overrides = BTreeMap::new();
        overrides.insert("__port__".to_string(), port.to_string());

        // When: Expanding
        let group = expand_target(&base, overrides, "10.0.0.1", 10000);

        // Then: The target ends with the override port
        prop_assert_eq!(&group.targets[0], &format!("10.0.0.1:{port}"));
    }

    #[test]
    fn test_parse_overrides_roundtrips_string_maps(
        entries in proptest::collection::btree_map("[a-z_]{1,15}", "[a-zA-Z0-9 ]{0,20}", 0..6)
    ) {
        // Given: Any string-to-string mapping encoded the way the custom
        // field stores it
        let raw = serde_json::to_string(&entries).unwrap();
        let value = serde_json::Value::String(raw);

        // When: Parsing the payload
        let parsed = parse_overrides(&value).unwrap();

        // Then: One mapping comes back, equal to the input
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(&parsed[0], &entries);
    }

    #[test]
    fn test_parse_overrides_never_panics(raw in "\\PC*") {
        // Given: Arbitrary text in the custom field
        let value = serde_json::Value::String(raw);

        // Then: Parsing returns Ok or Err, never panics
        let _ = parse_overrides(&value);
    }
}
