//! Accumulates diagnostics across a pass that must "collect and continue"
//! (spec.md §4.5: "Unknown identifiers are fatal to the function but should
//! not abort the whole pass; collect and continue where recovery is safe").

use crate::diagnostic::Diagnostic;
use crate::guarantee::ErrorGuaranteed;
use crate::severity::Severity;

#[derive(Default)]
pub struct Queue {
    diagnostics: Vec<Diagnostic>,
}

impl Queue {
    pub fn new() -> Self {
        Queue {
            diagnostics: Vec::new(),
        }
    }

    /// Pushes an error-severity diagnostic and returns proof that it was
    /// reported, for use as the `Err` of a `Result<T, ErrorGuaranteed>`.
    pub fn error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert_eq!(diagnostic.severity, Severity::Error);
        self.diagnostics.push(diagnostic);
        ErrorGuaranteed::new_from_queue()
    }

    pub fn warn(&mut self, diagnostic: Diagnostic) {
        debug_assert_eq!(diagnostic.severity, Severity::Warning);
        self.diagnostics.push(diagnostic);
    }

    /// Proof-of-emission for "did this pass, as a whole, emit any error"
    /// (spec.md §7: "Any error at the end of the type-checking stage aborts
    /// the pipeline before conversion"). Unlike [`Queue::error`], which
    /// proves one specific diagnostic was pushed, this proves the queue's
    /// accumulated state at the point of the call.
    pub fn check(&self) -> Result<(), ErrorGuaranteed> {
        if self.has_errors() {
            Err(ErrorGuaranteed::new_from_queue())
        } else {
            Ok(())
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn extend(&mut self, other: Queue) {
        self.diagnostics.extend(other.diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_ir::Span;

    #[test]
    fn error_marks_queue_non_empty() {
        let mut q = Queue::new();
        let _proof = q.error(Diagnostic::break_outside_loop(Span::DUMMY));
        assert!(q.has_errors());
        assert_eq!(q.len(), 1);
    }
}
