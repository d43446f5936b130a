use std::path::PathBuf;

use clap::ValueEnum;
use secrecy::SecretString;

use crate::error::{Result, SdError};

/// Default scrape port when neither the configuration nor a custom field
/// override supplies one.
pub const DEFAULT_PORT: u16 = 10000;

/// Custom field holding the embedded label payload on inventory objects.
pub const DEFAULT_CUSTOM_FIELD: &str = "prom_labels";

/// Which inventory collections a run walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiscoveryMode {
    /// Devices, virtual machines and flagged IP addresses.
    Device,
    /// Circuits, resolved through their A/Z terminations.
    Circuit,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub netbox: NetboxConfig,
    pub discovery: DiscoveryConfig,
    pub output: OutputTarget,
}

#[derive(Debug, Clone)]
pub struct NetboxConfig {
    pub url: String,
    pub token: SecretString,
}

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub mode: DiscoveryMode,
    pub port: u16,
    pub custom_field: String,
}

/// Where the service-discovery document goes. `-` on the command line
/// selects stdout; anything else is a file path written atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(arg))
        }
    }
}

impl NetboxConfig {
    /// Normalizes and validates the NetBox base URL. A trailing slash is
    /// stripped so endpoint paths can be appended uniformly.
    pub fn new(url: &str, token: SecretString) -> Result<Self> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SdError::Config(format!(
                "NetBox URL must be http(s), got '{url}'"
            )));
        }
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            token,
        })
    }
}
