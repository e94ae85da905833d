//! Collects the log messages a program emits while it runs.

pub use log;
use std::{cell::RefCell, rc::Rc};

const LOG_MESSAGES_BYTES_LIMIT: usize = 10 * 1000;

#[derive(Debug)]
pub struct LogCollector {
    messages: Vec<String>,
    bytes_written: usize,
    bytes_limit: Option<usize>,
    limit_warning: bool,
}

impl Default for LogCollector {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            bytes_written: 0,
            bytes_limit: Some(LOG_MESSAGES_BYTES_LIMIT),
            limit_warning: false,
        }
    }
}

impl LogCollector {
    pub fn log(&mut self, message: &str) {
        let limit = match self.bytes_limit {
            Some(limit) => limit,
            None => {
                self.messages.push(message.to_string());
                return;
            }
        };

        let bytes_written = self.bytes_written.saturating_add(message.len());
        if bytes_written >= limit {
            if !self.limit_warning {
                self.limit_warning = true;
                self.messages.push(String::from("Log truncated"));
            }
        } else {
            self.bytes_written = bytes_written;
            self.messages.push(message.to_string());
        }
    }

    pub fn get_recorded_content(&self) -> &[String] {
        self.messages.as_slice()
    }

    pub fn new_ref() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn new_ref_with_limit(bytes_limit: Option<usize>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            bytes_limit,
            ..Self::default()
        }))
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Convenience macro to log a message with an `Option<Rc<RefCell<LogCollector>>>`
#[macro_export]
macro_rules! ic_logger_msg {
    ($log_collector:expr, $message:expr) => {
        $crate::log_collector::log::debug!(
            target: "loader_v4_program_runtime::log_collector",
            "{}",
            $message
        );
        if let Some(log_collector) = $log_collector.as_ref() {
            if let Ok(mut log_collector) = log_collector.try_borrow_mut() {
                log_collector.log($message);
            }
        }
    };
    ($log_collector:expr, $fmt:expr, $($arg:tt)*) => {
        let message = format!($fmt, $($arg)*);
        $crate::log_collector::log::debug!(
            target: "loader_v4_program_runtime::log_collector",
            "{}",
            message
        );
        if let Some(log_collector) = $log_collector.as_ref() {
            if let Ok(mut log_collector) = log_collector.try_borrow_mut() {
                log_collector.log(&message);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_messages_bytes_limit() {
        let lc = LogCollector::new_ref_with_limit(Some(8));
        lc.borrow_mut().log("aa");
        lc.borrow_mut().log("aa");
        lc.borrow_mut().log("aaaaaaaa");
        lc.borrow_mut().log("aaaa");
        let messages = Rc::try_unwrap(lc).unwrap().into_inner().into_messages();
        assert_eq!(
            messages,
            vec![
                "aa".to_string(),
                "aa".to_string(),
                "Log truncated".to_string(),
            ],
        );
    }

    #[test]
    fn test_no_limit() {
        let lc = LogCollector::new_ref_with_limit(None);
        for _ in 0..4 {
            lc.borrow_mut().log("message");
        }
        assert_eq!(lc.borrow().get_recorded_content().len(), 4);
    }
}
