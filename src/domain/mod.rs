//! Core domain types for sitedeck

mod log_event;

pub use log_event::{truncate_log, LogEvent, LogEventKind};
