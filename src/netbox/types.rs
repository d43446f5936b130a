//! NetBox API Type Definitions
//!
//! Rust struct definitions for the slices of the NetBox REST API this tool
//! consumes. Everything deserializes from the standard paginated list
//! envelope or from single-object detail endpoints.
//!
//! # Design Notes
//!
//! - **Optional Fields**: NetBox omits or nulls many attributes depending on
//!   object state (unnamed devices, missing racks, detached terminations), so
//!   most nested references are `Option<T>`.
//! - **Serde Defaults**: `#[serde(default)]` keeps deserialization tolerant
//!   of older API versions that drop fields entirely.
//! - **Custom fields**: delivered as an arbitrary JSON map. The tracked
//!   field's value is opaque text parsed lazily by the discovery layer.
//!
//! # API Endpoints Covered
//!
//! - `/api/dcim/devices/` → [`Device`]
//! - `/api/virtualization/virtual-machines/` → [`VirtualMachine`]
//! - `/api/ipam/ip-addresses/` → [`IpAddress`]
//! - `/api/circuits/circuits/` → [`Circuit`]
//! - `/api/circuits/circuit-terminations/` → [`CircuitTermination`]

use std::collections::HashMap;

use serde::Deserialize;

/// Arbitrary custom-field map attached to any NetBox object.
pub type CustomFields = HashMap<String, serde_json::Value>;

/// Standard NetBox list envelope.
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Device from `/api/dcim/devices/`
#[derive(Debug, Deserialize, Clone)]
pub struct Device {
    pub id: i64,
    pub name: Option<String>,
    pub site: Option<SiteRef>,
    #[serde(default, alias = "device_role")]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub rack: Option<RackRef>,
    #[serde(default)]
    pub serial: String,
    pub primary_ip: Option<IpRef>,
    #[serde(default)]
    pub custom_fields: CustomFields,
}

/// Virtual machine from `/api/virtualization/virtual-machines/`
#[derive(Debug, Deserialize, Clone)]
pub struct VirtualMachine {
    pub id: i64,
    pub name: Option<String>,
    pub site: Option<SiteRef>,
    #[serde(default)]
    pub cluster: Option<ClusterRef>,
    pub primary_ip: Option<IpRef>,
    #[serde(default)]
    pub custom_fields: CustomFields,
}

/// IP address from `/api/ipam/ip-addresses/`
///
/// `address` always carries the prefix length (`192.0.2.5/24`).
#[derive(Debug, Deserialize, Clone)]
pub struct IpAddress {
    pub id: i64,
    pub address: String,
    #[serde(default)]
    pub custom_fields: CustomFields,
}

/// Circuit from `/api/circuits/circuits/`
#[derive(Debug, Deserialize, Clone)]
pub struct Circuit {
    pub id: i64,
    pub cid: String,
    #[serde(default)]
    pub custom_fields: CustomFields,
}

/// Circuit termination from `/api/circuits/circuit-terminations/`
#[derive(Debug, Deserialize, Clone)]
pub struct CircuitTermination {
    pub id: i64,
    #[serde(default)]
    pub term_side: String,
    #[serde(default)]
    pub connected_endpoint: Option<ConnectedEndpoint>,
}

/// The interface a circuit termination lands on, with its parent device.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectedEndpoint {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub device: Option<DeviceRef>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceRef {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteRef {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoleRef {
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RackRef {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClusterRef {
    pub name: Option<String>,
}

/// Primary or assigned IP reference nested in device/VM payloads.
#[derive(Debug, Deserialize, Clone)]
pub struct IpRef {
    pub id: i64,
    pub address: String,
}

/// Which end of a circuit a termination record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSide {
    A,
    Z,
}

impl TermSide {
    pub fn as_str(self) -> &'static str {
        match self {
            TermSide::A => "A",
            TermSide::Z => "Z",
        }
    }
}
