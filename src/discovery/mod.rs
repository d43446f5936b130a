//! Discovery Producers
//!
//! The two pipeline modes that turn NetBox inventory into Prometheus
//! file-based service-discovery target groups.
//!
//! # Architecture
//!
//! Producers follow a consistent pattern:
//! - Fetch one or more inventory collections through [`crate::netbox::NetboxClient`]
//! - Skip items that do not carry the tracked custom field
//! - Build a base label set from inventory attributes
//! - Parse the custom field's embedded JSON payload into override mappings
//! - Emit one [`TargetGroup`] per override mapping, override winning on
//!   key collisions
//!
//! # Error Handling
//!
//! A malformed custom-field payload skips that item with a warning; the run
//! continues. Only the initial collection fetches are fatal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DiscoveryConfig;
use crate::error::{Result, SdError};
use crate::netbox::types::{CustomFields, Device, IpAddress, VirtualMachine};

pub mod circuit;
pub mod device;

pub use circuit::discover_circuits;
pub use device::discover_devices;

/// Reserved label consumed by the scrape pipeline to pick the target port.
/// Base sets always carry it; overrides may replace it.
pub const PORT_LABEL: &str = "__port__";
pub const NAME_LABEL: &str = "__meta_netbox_name";
pub const SITE_LABEL: &str = "__meta_netbox_site";
pub const ROLE_LABEL: &str = "__meta_netbox_role";
pub const RACK_LABEL: &str = "__meta_netbox_rack";
pub const SERIAL_LABEL: &str = "__meta_netbox_serial";
pub const CLUSTER_LABEL: &str = "__meta_netbox_cluster";
/// Circuit mode only: the resolved far-end (Z side) address.
pub const TARGET_LABEL: &str = "__meta_netbox_target";

/// One entry of the service-discovery document.
///
/// Field order is part of the output contract: `targets` serializes before
/// `labels`. `targets` always holds a single `host:port` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub targets: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

/// A label-override mapping decoded from the tracked custom field.
pub type LabelOverrides = BTreeMap<String, String>;

/// Uniform view over the three inventory kinds device mode iterates.
///
/// NetBox returns differently-shaped objects for devices, virtual machines
/// and raw IP addresses; this enum gives the producer one accessor surface
/// instead of per-kind attribute probing.
#[derive(Debug, Clone)]
pub enum InventoryItem {
    Device(Device),
    VirtualMachine(VirtualMachine),
    IpAddress(IpAddress),
}

impl InventoryItem {
    /// Display name, falling back to a textual representation for objects
    /// without a name attribute (an IP address is named by its address).
    pub fn name(&self) -> String {
        match self {
            InventoryItem::Device(d) => d
                .name
                .clone()
                .unwrap_or_else(|| format!("device-{}", d.id)),
            InventoryItem::VirtualMachine(vm) => vm
                .name
                .clone()
                .unwrap_or_else(|| format!("virtual-machine-{}", vm.id)),
            InventoryItem::IpAddress(ip) => ip.address.clone(),
        }
    }

    /// Raw value of the tracked custom field, if set.
    pub fn tracked_field<'a>(&'a self, field: &str) -> Option<&'a Value> {
        let fields = match self {
            InventoryItem::Device(d) => &d.custom_fields,
            InventoryItem::VirtualMachine(vm) => &vm.custom_fields,
            InventoryItem::IpAddress(ip) => &ip.custom_fields,
        };
        tracked_value(fields, field)
    }

    /// Address to scrape: the primary IP when the item has one, otherwise
    /// the item's own address field. Still carries the prefix length.
    pub fn address(&self) -> Option<&str> {
        match self {
            InventoryItem::Device(d) => d.primary_ip.as_ref().map(|ip| ip.address.as_str()),
            InventoryItem::VirtualMachine(vm) => {
                vm.primary_ip.as_ref().map(|ip| ip.address.as_str())
            }
            InventoryItem::IpAddress(ip) => Some(ip.address.as_str()),
        }
    }

    fn site_slug(&self) -> Option<&str> {
        let site = match self {
            InventoryItem::Device(d) => d.site.as_ref(),
            InventoryItem::VirtualMachine(vm) => vm.site.as_ref(),
            InventoryItem::IpAddress(_) => None,
        };
        site.and_then(|s| s.slug.as_deref())
    }
}

/// The tracked custom field counts as set only when it holds a non-empty
/// value; `null` and `""` both mean "not opted in".
pub fn tracked_value<'a>(fields: &'a CustomFields, field: &str) -> Option<&'a Value> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
}

/// Strips the network prefix from a stored NetBox address, keeping the bare
/// IP: `192.0.2.5/24` becomes `192.0.2.5`.
pub fn bare_ip(address: &str) -> &str {
    address.split('/').next().unwrap_or(address)
}

/// Base label set shared by every target an item expands to.
///
/// Always carries the default port and the item name; site, role, rack,
/// serial and cluster are attached when the inventory object has them.
pub fn base_labels(item: &InventoryItem, config: &DiscoveryConfig) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(PORT_LABEL.to_string(), config.port.to_string());
    labels.insert(NAME_LABEL.to_string(), item.name());

    if let Some(slug) = item.site_slug() {
        labels.insert(SITE_LABEL.to_string(), slug.to_string());
    }

    match item {
        InventoryItem::Device(d) => {
            if let Some(slug) = d.role.as_ref().and_then(|r| r.slug.as_deref()) {
                labels.insert(ROLE_LABEL.to_string(), slug.to_string());
            }
            if let Some(rack) = d.rack.as_ref().and_then(|r| r.name.as_deref()) {
                labels.insert(RACK_LABEL.to_string(), rack.to_string());
            }
            if !d.serial.is_empty() {
                labels.insert(SERIAL_LABEL.to_string(), d.serial.clone());
            }
        }
        InventoryItem::VirtualMachine(vm) => {
            if let Some(cluster) = vm.cluster.as_ref().and_then(|c| c.name.as_deref()) {
                labels.insert(CLUSTER_LABEL.to_string(), cluster.to_string());
            }
        }
        InventoryItem::IpAddress(_) => {}
    }

    labels
}

/// Decodes the tracked custom field into a list of override mappings.
///
/// The stored value must be a JSON string whose content is either a single
/// object or an array of objects mapping label names to string values. A
/// single object is normalized to a one-element list.
pub fn parse_overrides(value: &Value) -> Result<Vec<LabelOverrides>> {
    let raw = value
        .as_str()
        .ok_or_else(|| SdError::CustomField("expected a JSON string payload".to_string()))?;

    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| SdError::CustomField(e.to_string()))?;

    match parsed {
        Value::Object(map) => Ok(vec![coerce_overrides(map)?]),
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::Object(map) => coerce_overrides(map),
                other => Err(SdError::CustomField(format!(
                    "expected an object in override list, got {other}"
                ))),
            })
            .collect(),
        other => Err(SdError::CustomField(format!(
            "expected an object or an array of objects, got {other}"
        ))),
    }
}

fn coerce_overrides(map: serde_json::Map<String, Value>) -> Result<LabelOverrides> {
    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            other => Err(SdError::CustomField(format!(
                "label '{key}' must be a string, got {other}"
            ))),
        })
        .collect()
}

/// Merges override labels onto a copy of the base set and forms the final
/// `host:port` target. The merged port label wins over the configured
/// default.
pub fn expand_target(
    base: &BTreeMap<String, String>,
    overrides: LabelOverrides,
    host: &str,
    default_port: u16,
) -> TargetGroup {
    let mut labels = base.clone();
    labels.extend(overrides);

    let port = labels
        .get(PORT_LABEL)
        .cloned()
        .unwrap_or_else(|| default_port.to_string());

    TargetGroup {
        targets: vec![format!("{host}:{port}")],
        labels,
    }
}
