//! Configuration validation tests
//!
//! Tests that verify configuration defaults and URL/output handling.

use std::path::PathBuf;

use netbox_sd::config::{
    DiscoveryConfig, DiscoveryMode, NetboxConfig, OutputTarget, DEFAULT_CUSTOM_FIELD, DEFAULT_PORT,
};
use secrecy::SecretString;

#[test]
fn test_default_constants() {
    // Given: The documented CLI defaults
    // Then: Port 10000 and the prom_labels custom field
    assert_eq!(DEFAULT_PORT, 10000);
    assert_eq!(DEFAULT_CUSTOM_FIELD, "prom_labels");
}

#[test]
fn test_netbox_url_requires_http_scheme() {
    // Given: A URL without an http(s) scheme
    let result = NetboxConfig::new("netbox.example.com", SecretString::from("token"));

    // Then: Configuration is rejected
    assert!(result.is_err());
}

#[test]
fn test_netbox_url_trailing_slash_is_stripped() {
    // Given: A base URL with a trailing slash
    let config =
        NetboxConfig::new("https://netbox.example.com/", SecretString::from("token")).unwrap();

    // Then: The stored URL has no trailing slash, so paths append cleanly
    assert_eq!(config.url, "https://netbox.example.com");
}

#[test]
fn test_netbox_url_accepted_verbatim_otherwise() {
    let config =
        NetboxConfig::new("http://10.0.0.1:8000", SecretString::from("token")).unwrap();
    assert_eq!(config.url, "http://10.0.0.1:8000");
}

#[test]
fn test_output_dash_selects_stdout() {
    // Given: The conventional `-` output argument
    // Then: Stdout mode, no file involved
    assert_eq!(OutputTarget::from_arg("-"), OutputTarget::Stdout);
}

#[test]
fn test_output_path_selects_file() {
    assert_eq!(
        OutputTarget::from_arg("/etc/prometheus/netbox.json"),
        OutputTarget::File(PathBuf::from("/etc/prometheus/netbox.json"))
    );
}

#[test]
fn test_discovery_config_construction() {
    // Given: Manual DiscoveryConfig construction
    let config = DiscoveryConfig {
        mode: DiscoveryMode::Circuit,
        port: 9100,
        custom_field: "prom_labels".to_string(),
    };

    // Then: Values should be set correctly
    assert_eq!(config.mode, DiscoveryMode::Circuit);
    assert_eq!(config.port, 9100);
    assert_eq!(config.custom_field, "prom_labels");
}
