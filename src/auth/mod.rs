// Single shared Dashboard credential.
//
// At most one API key is active per process. Setting a new key builds a new
// client handle and replaces the old one; requests already running keep the
// handle they cloned. Nothing is persisted.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::vendor::{VendorApi, VendorConnector, VendorError};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key is missing")]
    Missing,
    #[error("API key is not set")]
    NotSet,
    #[error("API key rejected: {0}")]
    Rejected(#[source] VendorError),
}

/// Loggable summary of the active key.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialStatus {
    pub fingerprint: String,
    pub set_at: DateTime<Utc>,
}

#[derive(Clone)]
struct ActiveCredential {
    status: CredentialStatus,
    api: Arc<dyn VendorApi>,
}

#[derive(Clone)]
pub struct CredentialHolder {
    slot: Arc<RwLock<Option<ActiveCredential>>>,
    connector: Arc<dyn VendorConnector>,
}

impl CredentialHolder {
    pub fn new(connector: Arc<dyn VendorConnector>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            connector,
        }
    }

    /// Replace the active credential.
    ///
    /// A missing or blank key, or one the connector refuses, leaves the
    /// current handle untouched.
    pub fn set(&self, api_key: Option<&str>) -> Result<CredentialStatus, CredentialError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(CredentialError::Missing)?;

        let api = self
            .connector
            .connect(api_key)
            .map_err(CredentialError::Rejected)?;

        let status = CredentialStatus {
            fingerprint: fingerprint(api_key),
            set_at: Utc::now(),
        };

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(ActiveCredential {
            status: status.clone(),
            api,
        });

        Ok(status)
    }

    /// Snapshot of the active client handle.
    pub fn current(&self) -> Result<Arc<dyn VendorApi>, CredentialError> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|active| Arc::clone(&active.api))
            .ok_or(CredentialError::NotSet)
    }

    pub fn status(&self) -> Option<CredentialStatus> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|active| active.status.clone())
    }

    pub fn is_set(&self) -> bool {
        self.status().is_some()
    }
}

impl fmt::Debug for CredentialHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHolder")
            .field("active", &self.status())
            .finish()
    }
}

/// First 12 hex chars of the key's SHA-256, safe to log.
pub fn fingerprint(api_key: &str) -> String {
    let digest = Sha256::digest(api_key.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..12].to_string()
}
