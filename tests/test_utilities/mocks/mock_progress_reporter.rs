use std::sync::{Arc, Mutex};
use stig_catalog::prelude::*;

/// Mock ProgressReporter that records every call as a line of text
///
/// Clones share the same log.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    log: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, line: String) {
        self.log.lock().unwrap().push(line);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        match message {
            Some(message) => self.record(format!("Progress: {}/{} - {}", current, total, message)),
            None => self.record(format!("Progress: {}/{}", current, total)),
        }
    }

    fn report_error(&self, message: &str) {
        self.record(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.record(format!("Completed: {}", message));
    }
}
