//! State threaded through one phased emission run.

use tracing::warn;

use super::{Diagnostic, EmitPhase};

/// The current phase plus the diagnostics recorded so far.
#[derive(Debug)]
pub struct EmitContext {
    phase: EmitPhase,
    diagnostics: Vec<Diagnostic>,
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            phase: EmitPhase::Collect,
            diagnostics: Vec::new(),
        }
    }

    pub fn phase(&self) -> EmitPhase {
        self.phase
    }

    /// Move to the next phase. Returns `false` after the last one.
    pub fn advance(&mut self) -> bool {
        match self.phase.next() {
            Some(next) => {
                self.phase = next;
                true
            }
            None => false,
        }
    }

    /// Record a warning against a schema location and log it.
    pub fn warn(&mut self, location: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic::warning(self.phase.name(), message).at(location);
        warn!(
            phase = %self.phase,
            location = diagnostic.location.as_deref().unwrap_or_default(),
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}
