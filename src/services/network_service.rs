use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::types::{Aggregation, ClientRecord, EventRecord};
use crate::vendor::{Device, NetworkClient, PageLimit, ProductType, VendorApi, VendorError};

/// Organization, network, client and event queries against one Dashboard handle.
///
/// Remote calls run one after another. The aggregating operations never fail
/// as a whole: a network or product type whose fetch errors is logged,
/// recorded in [`Aggregation::failures`] and left out of the items.
pub struct NetworkService {
    api: Arc<dyn VendorApi>,
    event_pages: PageLimit,
}

impl NetworkService {
    pub fn new(api: Arc<dyn VendorApi>, event_pages: u32) -> Self {
        Self {
            api,
            event_pages: PageLimit::Pages(event_pages.max(1)),
        }
    }

    pub async fn organizations(&self) -> Result<Vec<Value>, VendorError> {
        let organizations = self.api.organizations().await?;
        tracing::info!("Retrieved {} organizations", organizations.len());
        Ok(organizations)
    }

    pub async fn networks(&self, org_id: &str) -> Result<Vec<Value>, VendorError> {
        let networks = self.api.organization_networks(org_id).await?;
        tracing::debug!("Retrieved {} networks for organization {}", networks.len(), org_id);
        Ok(networks)
    }

    /// Clients of every network joined to the device they last associated with.
    ///
    /// Output is network-major in input order, then vendor client order.
    pub async fn client_details(&self, network_ids: &[String]) -> Aggregation<ClientRecord> {
        let mut result = Aggregation::default();

        for network_id in network_ids {
            match self.network_client_details(network_id).await {
                Ok(records) => result.extend(records),
                Err(e) => {
                    tracing::error!("Error fetching details for network {}: {}", network_id, e);
                    result.fail(network_id.as_str(), e);
                }
            }
        }

        result
    }

    async fn network_client_details(&self, network_id: &str) -> Result<Vec<ClientRecord>, VendorError> {
        let clients = self.api.network_clients(network_id).await?;
        let devices = self.api.network_devices(network_id).await?;
        Ok(join_clients(network_id, clients, &devices))
    }

    /// Events of one network across every product type, flattened and tagged.
    ///
    /// Output is grouped by [`ProductType::ALL`] order, vendor order within a group.
    pub async fn events(&self, network_id: &str) -> Aggregation<EventRecord> {
        let mut result = Aggregation::default();

        for product_type in ProductType::ALL {
            match self
                .api
                .network_events(network_id, product_type, self.event_pages)
                .await
            {
                Ok(log) => result.extend(
                    log.events
                        .into_iter()
                        .map(|event| EventRecord::new(event, product_type)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Error fetching events for product type {} in network {}: {}",
                        product_type,
                        network_id,
                        e
                    );
                    result.fail(format!("{}/{}", network_id, product_type), e);
                }
            }
        }

        result
    }
}

/// Attach each client to the device whose serial equals its `recentDeviceSerial`.
///
/// Serials compare by exact string equality. When a serial is listed twice
/// the first device wins.
pub fn join_clients(network_id: &str, clients: Vec<NetworkClient>, devices: &[Device]) -> Vec<ClientRecord> {
    let mut by_serial: HashMap<&str, &Device> = HashMap::with_capacity(devices.len());
    for device in devices {
        by_serial.entry(device.serial.as_str()).or_insert(device);
    }

    clients
        .into_iter()
        .map(|client| {
            let device = client
                .recent_device_serial
                .as_deref()
                .and_then(|serial| by_serial.get(serial).copied());
            ClientRecord::new(network_id, client, device)
        })
        .collect()
}
