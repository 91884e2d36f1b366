use std::sync::{Arc, Mutex};

use capline::port::outbound::diagnostics::{Diagnostic, DiagnosticSink};

/// Thread-safe diagnostic collector for orchestrator assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingSink {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().expect("lock diagnostics").len()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().expect("lock diagnostics").clone()
    }

    /// Diagnostics whose kind matches `kind`.
    pub fn of_kind(&self, kind: &str) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.kind() == kind)
            .collect()
    }

    pub fn as_sink(&self) -> Arc<dyn DiagnosticSink> {
        Arc::new(self.clone())
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .expect("lock diagnostics")
            .push(diagnostic);
    }
}
