//! Import telemetry
//!
//! Observers are notified at fixed points of an import (entry, each
//! terminal outcome). They see addresses and endpoints, never key material,
//! and cannot influence the import result.

pub mod business_metrics;

use tracing::{info, warn};

use crate::core::domain::AccountAddress;
use crate::core::errors::ImportErrorKind;

pub use business_metrics::ImportMetrics;

/// Transition points of a private-key import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Started { network: String },
    Succeeded { address: AccountAddress, network: String },
    Failed { kind: ImportErrorKind, address: Option<AccountAddress>, network: String },
}

impl ImportEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ImportEvent::Started { .. } => "login_with_private_key_started",
            ImportEvent::Succeeded { .. } => "login_with_private_key",
            ImportEvent::Failed { .. } => "error_login_with_private_key",
        }
    }
}

/// Side-channel receiver of import events.
pub trait ImportObserver: Send + Sync {
    fn on_event(&self, event: &ImportEvent);
}

/// Writes every import event to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_event(&self, event: &ImportEvent) {
        match event {
            ImportEvent::Started { network } => {
                info!(event = event.name(), network = %network, "Import started");
            }
            ImportEvent::Succeeded { address, network } => {
                info!(event = event.name(), address = %address, network = %network, "Import succeeded");
            }
            ImportEvent::Failed { kind, address, network } => {
                let address = address.map(|a| a.to_string()).unwrap_or_default();
                warn!(event = event.name(), kind = %kind, address = %address, network = %network, "Import failed");
            }
        }
    }
}
