use crate::domains::logger::DomainLogger;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Forwards domain log lines to the `tracing` subscriber.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "warehouse_agv::domain", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "warehouse_agv::domain", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "warehouse_agv::domain", "{}", msg);
    }
}

/// Console-backed DomainLogger; the fallback when no log file can be opened.
pub fn init_tracing_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge {})
}

/// Install the global `tracing` subscriber, filtered by `RUST_LOG` or
/// `default_filter`.
///
/// Does not bridge the `log` facade, so the fast_log file logger can still
/// claim it afterwards.
pub fn init_tracing_subscriber(default_filter: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}
