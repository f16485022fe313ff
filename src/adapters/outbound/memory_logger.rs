use crate::domains::logger::DomainLogger;
use std::sync::{Arc, Mutex, PoisonError};

struct NoOp;

impl DomainLogger for NoOp {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Logger that drops everything; default for tests that don't inspect logs.
pub fn init_noop_logger() -> Arc<dyn DomainLogger> {
    Arc::new(NoOp {})
}

/// Keeps every line in memory as `LEVEL:message`.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{}:{}", level, msg));
    }
}

impl DomainLogger for MemoryLogger {
    fn info(&self, msg: &str) {
        self.push("INFO", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("WARN", msg);
    }

    fn error(&self, msg: &str) {
        self.push("ERROR", msg);
    }
}
