use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::vendor::{
    Device, EventLog, NetworkClient, PageLimit, ProductType, VendorApi, VendorConnector, VendorError,
    VendorEvent,
};

/// In-memory Dashboard used by unit and router tests.
///
/// Each remote call is recorded as a scope string (`clients:N1`,
/// `events:N1:camera`, ...). Scopes added with [`FakeDashboard::failing`]
/// return a 500 instead of data.
#[derive(Clone, Default)]
pub struct FakeDashboard {
    organizations: Vec<Value>,
    networks: HashMap<String, Vec<Value>>,
    clients: HashMap<String, Vec<NetworkClient>>,
    devices: HashMap<String, Vec<Device>>,
    events: HashMap<(String, ProductType), Vec<VendorEvent>>,
    failing: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeDashboard {
    pub fn with_organizations(mut self, organizations: Vec<Value>) -> Self {
        self.organizations = organizations;
        self
    }

    pub fn with_networks(mut self, org_id: &str, networks: Vec<Value>) -> Self {
        self.networks.insert(org_id.to_string(), networks);
        self
    }

    pub fn with_clients(mut self, network_id: &str, clients: Vec<NetworkClient>) -> Self {
        self.clients.insert(network_id.to_string(), clients);
        self
    }

    pub fn with_devices(mut self, network_id: &str, devices: Vec<Device>) -> Self {
        self.devices.insert(network_id.to_string(), devices);
        self
    }

    pub fn with_events(mut self, network_id: &str, product_type: ProductType, events: Vec<VendorEvent>) -> Self {
        self.events.insert((network_id.to_string(), product_type), events);
        self
    }

    pub fn failing(mut self, scope: &str) -> Self {
        self.failing.insert(scope.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, scope: String) -> Result<(), VendorError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(scope.clone());
        }
        if self.failing.contains(&scope) {
            return Err(VendorError::Api {
                status: 500,
                message: format!("{} failed", scope),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VendorApi for FakeDashboard {
    async fn organizations(&self) -> Result<Vec<Value>, VendorError> {
        self.record("organizations".to_string())?;
        Ok(self.organizations.clone())
    }

    async fn organization_networks(&self, org_id: &str) -> Result<Vec<Value>, VendorError> {
        self.record(format!("networks:{}", org_id))?;
        Ok(self.networks.get(org_id).cloned().unwrap_or_default())
    }

    async fn network_clients(&self, network_id: &str) -> Result<Vec<NetworkClient>, VendorError> {
        self.record(format!("clients:{}", network_id))?;
        Ok(self.clients.get(network_id).cloned().unwrap_or_default())
    }

    async fn network_devices(&self, network_id: &str) -> Result<Vec<Device>, VendorError> {
        self.record(format!("devices:{}", network_id))?;
        Ok(self.devices.get(network_id).cloned().unwrap_or_default())
    }

    async fn network_events(
        &self,
        network_id: &str,
        product_type: ProductType,
        _limit: PageLimit,
    ) -> Result<EventLog, VendorError> {
        self.record(format!("events:{}:{}", network_id, product_type))?;
        let events = self
            .events
            .get(&(network_id.to_string(), product_type))
            .cloned()
            .unwrap_or_default();
        Ok(EventLog {
            events,
            ..Default::default()
        })
    }
}

/// Connector handing out fresh `FakeDashboard` handles and remembering keys.
#[derive(Clone)]
pub struct FakeConnector {
    dashboard: FakeDashboard,
    keys: Arc<Mutex<Vec<String>>>,
    refuse: Arc<AtomicBool>,
}

impl FakeConnector {
    pub fn new(dashboard: FakeDashboard) -> Self {
        Self {
            dashboard,
            keys: Arc::new(Mutex::new(Vec::new())),
            refuse: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    /// Make the next `connect` fail.
    pub fn refuse_next(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }
}

impl VendorConnector for FakeConnector {
    fn connect(&self, api_key: &str) -> Result<Arc<dyn VendorApi>, VendorError> {
        if self.refuse.swap(false, Ordering::SeqCst) {
            return Err(VendorError::InvalidApiKey("refused by test connector".into()));
        }
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(api_key.to_string());
        }
        Ok(Arc::new(self.dashboard.clone()))
    }
}

pub fn client(mac: &str, serial: Option<&str>) -> NetworkClient {
    NetworkClient {
        mac: Some(mac.to_string()),
        recent_device_serial: serial.map(str::to_string),
        ..Default::default()
    }
}

pub fn device(serial: &str, name: &str, model: &str) -> Device {
    Device {
        serial: serial.to_string(),
        name: Some(name.to_string()),
        model: Some(model.to_string()),
    }
}

pub fn event(description: &str) -> VendorEvent {
    VendorEvent {
        description: Some(description.to_string()),
        ..Default::default()
    }
}
