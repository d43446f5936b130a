//! NetBox Prometheus Service Discovery
//!
//! A one-shot generator that turns a NetBox inventory into a Prometheus
//! file-based service-discovery document.
//!
//! # Overview
//!
//! The tool queries the NetBox REST API, filters devices, virtual machines,
//! IP addresses, and circuits carrying a tracked custom field, and writes a
//! JSON array of `{targets, labels}` entries. Run it from cron or a sidecar;
//! Prometheus re-reads the output file on its own schedule.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐       HTTP        ┌──────────────┐
//! │   NetBox    │ ◄───────────────► │  netbox-sd   │
//! │  inventory  │     REST API      │              │
//! └─────────────┘                   │  ┌────────┐  │    JSON file   ┌────────────┐
//!                                   │  │ Client │  │ ─────────────► │ Prometheus │
//!                                   │  └────────┘  │    file_sd     └────────────┘
//!                                   │  ┌────────┐  │
//!                                   │  │Discover│  │
//!                                   │  └────────┘  │
//!                                   └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`netbox`] - REST client and API type definitions
//! - [`discovery`] - device-mode and circuit-mode producers
//! - [`output`] - atomic file / stdout document writer
//! - [`config`] - configuration management
//! - [`error`] - error types
//!
//! # Quick Start
//!
//! ```no_run
//! use netbox_sd::config::{DiscoveryConfig, DiscoveryMode, NetboxConfig};
//! use netbox_sd::discovery;
//! use netbox_sd::netbox::NetboxClient;
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let netbox = NetboxConfig::new("https://netbox.example.com", SecretString::from("token"))?;
//!     let client = NetboxClient::new(&netbox)?;
//!     let config = DiscoveryConfig {
//!         mode: DiscoveryMode::Device,
//!         port: 10000,
//!         custom_field: "prom_labels".to_string(),
//!     };
//!     let groups = discovery::discover_devices(&client, &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&groups)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod netbox;
pub mod output;
