//! NetBox REST API Client
//!
//! Thin typed wrapper over the NetBox HTTP API. Authentication is a static
//! API token sent as `Authorization: Token <key>` on every request; list
//! endpoints are paginated and the client follows `next` links until the
//! collection is exhausted.
//!
//! # Example
//!
//! ```no_run
//! use netbox_sd::config::NetboxConfig;
//! use netbox_sd::netbox::NetboxClient;
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = NetboxConfig::new("https://netbox.example.com", SecretString::from("token"))?;
//! let client = NetboxClient::new(&config)?;
//! let devices = client.list_devices().await?;
//! # Ok(())
//! # }
//! ```

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::NetboxConfig;
use crate::error::{Result, SdError};
use crate::netbox::types::*;

/// Client for the NetBox REST API
///
/// Holds a single `reqwest::Client` with the token header pre-installed.
/// All calls are sequential; nothing here retries or caches.
pub struct NetboxClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetboxClient {
    pub fn new(config: &NetboxConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Token {}", config.token.expose_secret()))
            .map_err(|e| SdError::Config(format!("API token is not a valid header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
        })
    }

    /// Devices that can be polled at all: NetBox filters on `has_primary_ip`.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.get_paginated("/api/dcim/devices/", &[("has_primary_ip", "true".into())])
            .await
    }

    pub async fn list_virtual_machines(&self) -> Result<Vec<VirtualMachine>> {
        self.get_paginated(
            "/api/virtualization/virtual-machines/",
            &[("has_primary_ip", "true".into())],
        )
        .await
    }

    /// IP addresses whose tracked custom field contains a JSON object
    /// marker, i.e. addresses opted into discovery directly rather than via
    /// their parent device.
    pub async fn list_flagged_ip_addresses(&self, custom_field: &str) -> Result<Vec<IpAddress>> {
        let filter = format!("cf_{custom_field}__ic");
        self.get_paginated("/api/ipam/ip-addresses/", &[(filter.as_str(), "{".into())])
            .await
    }

    pub async fn list_circuits(&self) -> Result<Vec<Circuit>> {
        self.get_paginated("/api/circuits/circuits/", &[]).await
    }

    /// Termination record for one side of a circuit, if the side exists.
    pub async fn get_termination(
        &self,
        circuit_id: i64,
        side: TermSide,
    ) -> Result<Option<CircuitTermination>> {
        let terminations: Vec<CircuitTermination> = self
            .get_paginated(
                "/api/circuits/circuit-terminations/",
                &[
                    ("circuit_id", circuit_id.to_string()),
                    ("term_side", side.as_str().into()),
                ],
            )
            .await?;
        Ok(terminations.into_iter().next())
    }

    pub async fn get_device(&self, id: i64) -> Result<Device> {
        self.get_json(&format!("{}/api/dcim/devices/{id}/", self.base_url), &[])
            .await
    }

    /// IP addresses assigned to a specific interface of a device. Used to
    /// resolve the Z side of a circuit to a reachable address.
    pub async fn list_interface_ip_addresses(
        &self,
        device_id: i64,
        interface_id: i64,
    ) -> Result<Vec<IpAddress>> {
        self.get_paginated(
            "/api/ipam/ip-addresses/",
            &[
                ("device_id", device_id.to_string()),
                ("interface_id", interface_id.to_string()),
            ],
        )
        .await
    }

    /// Fetch a full collection, following `next` links. Filter parameters
    /// apply to the first request only; NetBox carries them forward in the
    /// links it returns.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}{path}", self.base_url);
        let mut page: Paginated<T> = self.get_json(&url, query).await?;
        let mut items = std::mem::take(&mut page.results);

        while let Some(next) = page.next.take() {
            debug!("Following pagination link: {next}");
            page = self.get_json(&next, &[]).await?;
            items.append(&mut page.results);
        }

        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {url}");
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SdError::Api(format!("GET {url} returned {status}")));
        }

        Ok(response.json::<T>().await?)
    }
}
