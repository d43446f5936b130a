//! Device-Mode Producer
//!
//! Walks devices, virtual machines, and directly-flagged IP addresses and
//! expands each item carrying the tracked custom field into target groups.
//!
//! The three collection fetches are sequential and fatal on failure; a
//! malformed custom field only skips the item it belongs to.

use tracing::{debug, info, warn};

use super::{bare_ip, base_labels, expand_target, parse_overrides, InventoryItem, TargetGroup};
use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::netbox::NetboxClient;

pub async fn discover_devices(
    client: &NetboxClient,
    config: &DiscoveryConfig,
) -> Result<Vec<TargetGroup>> {
    let devices = client.list_devices().await?;
    let virtual_machines = client.list_virtual_machines().await?;
    let ip_addresses = client
        .list_flagged_ip_addresses(&config.custom_field)
        .await?;

    info!(
        "Fetched {} devices, {} virtual machines, {} flagged IP addresses",
        devices.len(),
        virtual_machines.len(),
        ip_addresses.len()
    );

    let items = devices
        .into_iter()
        .map(InventoryItem::Device)
        .chain(virtual_machines.into_iter().map(InventoryItem::VirtualMachine))
        .chain(ip_addresses.into_iter().map(InventoryItem::IpAddress));

    let mut groups = Vec::new();

    for item in items {
        let Some(payload) = item.tracked_field(&config.custom_field) else {
            continue;
        };

        let overrides = match parse_overrides(payload) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("Skipping {}: {}", item.name(), e);
                continue;
            }
        };

        let Some(address) = item.address() else {
            debug!("Skipping {}: no address", item.name());
            continue;
        };
        let host = bare_ip(address).to_string();

        let base = base_labels(&item, config);
        for override_set in overrides {
            groups.push(expand_target(&base, override_set, &host, config.port));
        }
    }

    Ok(groups)
}
