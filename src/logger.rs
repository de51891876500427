//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to a shared buffer for display in the UI.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Number of entries kept in the buffer.
///
pub const MAX_ENTRIES: usize = 1000;

/// Crate prefix of log targets that are shown below `Warn`.
///
const OWN_TARGET: &str = "menu_tui";

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Shared, bounded list of formatted log entries.
///
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    /// Append an entry, dropping the oldest past `MAX_ENTRIES`.
    ///
    pub fn push(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(entry);
            while entries.len() > MAX_ENTRIES {
                entries.pop_front();
            }
        }
    }

    /// Return up to `count` of the newest entries, oldest first.
    ///
    pub fn recent(&self, count: usize) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => {
                let skip = entries.len().saturating_sub(count);
                entries.iter().skip(skip).cloned().collect()
            }
            Err(_) => vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Custom logger that captures logs to state
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<Box<dyn Fn(String) + Send + Sync>>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: Box<dyn Fn(String) + Send + Sync>) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies are only heard from when something goes wrong
        if !metadata.target().starts_with(OWN_TARGET) {
            return metadata.level() <= Level::Warn && metadata.level() <= self.level;
        }
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install the logger globally, writing into `buffer`.
///
pub fn init(level: LevelFilter, buffer: LogBuffer) -> Result<(), AppError> {
    let logger = CustomLogger::new(level);
    logger.set_log_callback(Box::new(move |entry| buffer.push(entry)));
    let logger: &'static CustomLogger = Box::leak(Box::new(logger));
    log::set_logger(logger).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(level: Level, target: &'a str, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).target(target).args(args).build()
    }

    #[test]
    fn buffer_keeps_newest_entries() {
        let buffer = LogBuffer::default();
        for i in 0..(MAX_ENTRIES + 5) {
            buffer.push(format!("entry {}", i));
        }
        assert_eq!(buffer.len(), MAX_ENTRIES);
        let recent = buffer.recent(2);
        assert_eq!(
            recent,
            vec![
                format!("entry {}", MAX_ENTRIES + 3),
                format!("entry {}", MAX_ENTRIES + 4)
            ]
        );
        assert_eq!(buffer.recent(MAX_ENTRIES * 2).len(), MAX_ENTRIES);
    }

    #[test]
    fn logger_forwards_to_callback() {
        let buffer = LogBuffer::default();
        let logger = CustomLogger::new(LevelFilter::Info);
        let sink = buffer.clone();
        logger.set_log_callback(Box::new(move |entry| sink.push(entry)));

        logger.log(&record(Level::Info, "menu_tui::store", format_args!("saved")));
        logger.log(&record(Level::Debug, "menu_tui::store", format_args!("hidden")));
        logger.log(&record(Level::Info, "hyper::client", format_args!("noise")));
        logger.log(&record(Level::Warn, "reqwest", format_args!("slow")));

        let entries = buffer.recent(10);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("INFO saved"));
        assert!(entries[1].ends_with("WARN slow"));
    }

    #[test]
    fn logger_without_callback() {
        let logger = CustomLogger::new(LevelFilter::Trace);
        logger.log(&record(Level::Error, "menu_tui", format_args!("dropped")));
        let metadata = Metadata::builder()
            .level(Level::Trace)
            .target("menu_tui")
            .build();
        assert!(logger.enabled(&metadata));
    }
}
