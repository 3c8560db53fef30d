//! Import metrics
//!
//! Prometheus counters fed by [`ImportEvent`]s.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use super::{ImportEvent, ImportObserver};
use crate::core::errors::ImportErrorKind;

/// Import counters backed by a private registry.
pub struct ImportMetrics {
    registry: Registry,
    import_attempts_total: IntCounter,
    import_success_total: IntCounter,
    import_failures_total: IntCounterVec,
}

impl ImportMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let import_attempts_total =
            IntCounter::new("wallet_import_attempts_total", "Private-key import attempts")?;
        let import_success_total =
            IntCounter::new("wallet_import_success_total", "Accounts imported successfully")?;
        let import_failures_total = IntCounterVec::new(
            Opts::new("wallet_import_failures_total", "Failed imports by error kind"),
            &["kind"],
        )?;

        registry.register(Box::new(import_attempts_total.clone()))?;
        registry.register(Box::new(import_success_total.clone()))?;
        registry.register(Box::new(import_failures_total.clone()))?;

        // Pre-create every label so the series exist at zero.
        for kind in ImportErrorKind::ALL {
            import_failures_total.with_label_values(&[kind.as_str()]);
        }

        Ok(Self { registry, import_attempts_total, import_success_total, import_failures_total })
    }

    pub fn attempts(&self) -> u64 {
        self.import_attempts_total.get()
    }

    pub fn successes(&self) -> u64 {
        self.import_success_total.get()
    }

    pub fn failures(&self, kind: ImportErrorKind) -> u64 {
        self.import_failures_total.with_label_values(&[kind.as_str()]).get()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn gather_text(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl ImportObserver for ImportMetrics {
    fn on_event(&self, event: &ImportEvent) {
        match event {
            ImportEvent::Started { .. } => self.import_attempts_total.inc(),
            ImportEvent::Succeeded { .. } => self.import_success_total.inc(),
            ImportEvent::Failed { kind, .. } => {
                self.import_failures_total.with_label_values(&[kind.as_str()]).inc()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::AccountAddress;

    #[test]
    fn test_counts_events() {
        let metrics = ImportMetrics::new().unwrap();
        let network = "http://localhost:8080/v1".to_string();
        metrics.on_event(&ImportEvent::Started { network: network.clone() });
        metrics.on_event(&ImportEvent::Failed {
            kind: ImportErrorKind::AccountNotFound,
            address: Some(AccountAddress::new([1u8; 32])),
            network: network.clone(),
        });
        metrics.on_event(&ImportEvent::Started { network: network.clone() });
        metrics.on_event(&ImportEvent::Succeeded {
            address: AccountAddress::new([2u8; 32]),
            network,
        });

        assert_eq!(metrics.attempts(), 2);
        assert_eq!(metrics.successes(), 1);
        assert_eq!(metrics.failures(ImportErrorKind::AccountNotFound), 1);
        assert_eq!(metrics.failures(ImportErrorKind::InvalidFormat), 0);
    }

    #[test]
    fn test_gather_text() {
        let metrics = ImportMetrics::new().unwrap();
        let text = metrics.gather_text().unwrap();
        assert!(text.contains("wallet_import_attempts_total"));
        assert!(text.contains("kind=\"verification_failed\""));
    }
}
