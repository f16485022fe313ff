use crate::domains::logger::{DomainLogger, FileLogger};
use std::sync::Arc;

/// Initialize the fast_log file logger and return a domain logger the
/// application can inject.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<Arc<dyn DomainLogger>, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
