use std::sync::{Arc, Mutex};
use warehouse_agv::adapters::outbound::{
    init_file_logger, init_noop_logger, init_tracing_logger, MemoryLogger, MultiLogger,
};
use warehouse_agv::domains::logger::{DomainLogger, DynLogger};

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self {
        Self { messages: Arc::new(Mutex::new(Vec::new())) }
    }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[test]
fn test_multi_logger_fans_out() {
    let primary = Arc::new(BridgeCapture::new());
    let secondary = Arc::new(MemoryLogger::new());
    let multi = MultiLogger::new(primary.clone(), Some(secondary.clone()));

    multi.info("one");
    multi.warn("two");
    multi.error("three");

    let msgs = primary.messages.lock().unwrap();
    assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);
    assert_eq!(secondary.lines(), vec!["INFO:one", "WARN:two", "ERROR:three"]);
}

#[test]
fn test_multi_logger_without_secondary() {
    let primary = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(primary.clone(), None);
    multi.info("solo");
    assert_eq!(primary.messages.lock().unwrap().len(), 1);
}

#[test]
fn test_noop_and_tracing_loggers_accept_calls() {
    let noop = init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");

    let console: DynLogger = init_tracing_logger();
    console.warn("no subscriber installed");
}

// fast_log can only be initialized once per process; this is the only test
// in this binary that does so.
#[test]
fn test_file_logger_creates_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agv.log");
    let path_str = path.to_str().unwrap();

    let logger = init_file_logger(path_str, log::LevelFilter::Info).unwrap();
    logger.info("AGV agv-1 idle at (8,0)");
    logger.warn("Order 7 not found; nothing marked completed");

    assert!(path.exists());
}
