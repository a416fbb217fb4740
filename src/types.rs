//! Shared types used across the codebase

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::vendor::{Device, NetworkClient, ProductType, VendorEvent};

/// Flattened client row returned by `POST /networks/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_mac: Option<String>,
    pub client_user_id: Option<String>,
    pub client_timestamps: ClientTimestamps,
    pub network_id: String,
    /// Name of the device the client last associated with
    pub wap_name: Option<String>,
    /// Model of that device
    pub mr_device_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientTimestamps {
    pub first_seen: Option<Value>,
    pub last_seen: Option<Value>,
}

impl ClientRecord {
    pub fn new(network_id: &str, client: NetworkClient, device: Option<&Device>) -> Self {
        Self {
            client_mac: client.mac,
            client_user_id: client.user,
            client_timestamps: ClientTimestamps {
                first_seen: client.first_seen,
                last_seen: client.last_seen,
            },
            network_id: network_id.to_string(),
            wap_name: device.and_then(|d| d.name.clone()),
            mr_device_name: device.and_then(|d| d.model.clone()),
        }
    }
}

/// Flattened event row returned by `GET /networks/:network_id/events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub occurred_at: Option<String>,
    pub network_id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub client_id: Option<String>,
    pub client_description: Option<String>,
    pub client_mac: Option<String>,
    pub device_serial: Option<String>,
    pub device_name: Option<String>,
    pub ssid_number: Option<Value>,
    pub event_data: Value,
    pub product_type: ProductType,
}

impl EventRecord {
    pub fn new(event: VendorEvent, product_type: ProductType) -> Self {
        Self {
            occurred_at: event.occurred_at,
            network_id: event.network_id,
            event_type: event.event_type,
            description: event.description,
            category: event.category,
            client_id: event.client_id,
            client_description: event.client_description,
            client_mac: event.client_mac,
            device_serial: event.device_serial,
            device_name: event.device_name,
            ssid_number: event.ssid_number,
            event_data: event.event_data.unwrap_or_else(|| Value::Object(Map::new())),
            product_type,
        }
    }
}

/// A scope (network, or network/product type) dropped from an aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationFailure {
    pub scope: String,
    pub error: String,
}

/// Best-effort result: everything that succeeded plus what was skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation<T> {
    pub items: Vec<T>,
    pub failures: Vec<AggregationFailure>,
}

impl<T> Default for Aggregation<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> Aggregation<T> {
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    pub fn fail(&mut self, scope: impl Into<String>, error: impl ToString) {
        self.failures.push(AggregationFailure {
            scope: scope.into(),
            error: error.to_string(),
        });
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
