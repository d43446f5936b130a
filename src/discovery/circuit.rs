//! Circuit-Mode Producer
//!
//! Walks circuits and resolves both terminations to addresses: the A side
//! through the connected device's primary IP, the Z side through the IP
//! assigned to the far device's interface.
//!
//! The emitted target host is the A-side address; the Z-side address is
//! recorded in the `__meta_netbox_target` label. Resolution failures are
//! caught per circuit and degrade to "no address found".

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::{
    bare_ip, expand_target, parse_overrides, tracked_value, TargetGroup, NAME_LABEL, PORT_LABEL,
    TARGET_LABEL,
};
use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::netbox::types::{Circuit, TermSide};
use crate::netbox::NetboxClient;

pub async fn discover_circuits(
    client: &NetboxClient,
    config: &DiscoveryConfig,
) -> Result<Vec<TargetGroup>> {
    let circuits = client.list_circuits().await?;
    info!("Fetched {} circuits", circuits.len());

    let mut groups = Vec::new();

    for circuit in circuits {
        let Some(payload) = tracked_value(&circuit.custom_fields, &config.custom_field) else {
            continue;
        };

        let side_a = resolve_side(client, &circuit, TermSide::A).await;
        let side_z = resolve_side(client, &circuit, TermSide::Z).await;

        let (Some(side_a), Some(side_z)) = (side_a, side_z) else {
            debug!("Skipping circuit {}: unresolved termination", circuit.cid);
            continue;
        };

        let overrides = match parse_overrides(payload) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("Skipping circuit {}: {}", circuit.cid, e);
                continue;
            }
        };

        let mut base = BTreeMap::new();
        base.insert(PORT_LABEL.to_string(), config.port.to_string());
        base.insert(NAME_LABEL.to_string(), circuit.cid.clone());
        base.insert(TARGET_LABEL.to_string(), side_z);

        for override_set in overrides {
            groups.push(expand_target(&base, override_set, &side_a, config.port));
        }
    }

    Ok(groups)
}

/// Resolves one termination of a circuit to a bare IP. Lookup errors are
/// logged and collapse to `None` so a broken circuit never aborts the run.
async fn resolve_side(client: &NetboxClient, circuit: &Circuit, side: TermSide) -> Option<String> {
    let result = match side {
        TermSide::A => resolve_termination_a(client, circuit.id).await,
        TermSide::Z => resolve_termination_z(client, circuit.id).await,
    };
    match result {
        Ok(address) => address,
        Err(e) => {
            warn!(
                "Circuit {}: failed to resolve {} side: {}",
                circuit.cid,
                side.as_str(),
                e
            );
            None
        }
    }
}

/// A side: termination → connected device → that device's primary address.
async fn resolve_termination_a(client: &NetboxClient, circuit_id: i64) -> Result<Option<String>> {
    let Some(termination) = client.get_termination(circuit_id, TermSide::A).await? else {
        return Ok(None);
    };
    let Some(device_ref) = termination
        .connected_endpoint
        .and_then(|endpoint| endpoint.device)
    else {
        return Ok(None);
    };

    let device = client.get_device(device_ref.id).await?;
    Ok(device
        .primary_ip
        .map(|ip| bare_ip(&ip.address).to_string()))
}

/// Z side: termination → connected device and interface → first IP address
/// assigned to that interface.
async fn resolve_termination_z(client: &NetboxClient, circuit_id: i64) -> Result<Option<String>> {
    let Some(termination) = client.get_termination(circuit_id, TermSide::Z).await? else {
        return Ok(None);
    };
    let Some(endpoint) = termination.connected_endpoint else {
        return Ok(None);
    };
    let Some(device_ref) = endpoint.device.as_ref() else {
        return Ok(None);
    };

    let addresses = client
        .list_interface_ip_addresses(device_ref.id, endpoint.id)
        .await?;
    Ok(addresses
        .into_iter()
        .next()
        .map(|ip| bare_ip(&ip.address).to_string()))
}
