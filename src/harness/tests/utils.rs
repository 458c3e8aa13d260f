//! Shared test utilities

use crate::harness::api::DiagnosticsSink;
use crate::module::api::ContextSnapshot;
use std::sync::Mutex;

/// Sink capturing log lines and dumps for assertions
#[derive(Default)]
pub(crate) struct RecordingSink {
    lines: Mutex<Vec<String>>,
    dumps: Mutex<Vec<ContextSnapshot>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn dumps(&self) -> Vec<ContextSnapshot> {
        self.dumps.lock().unwrap().clone()
    }

    pub fn has_line_containing(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl DiagnosticsSink for RecordingSink {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }

    fn dump(&self, snapshot: &ContextSnapshot) {
        self.dumps.lock().unwrap().push(snapshot.clone());
    }
}
