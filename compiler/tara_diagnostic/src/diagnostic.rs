//! Structured diagnostics for the §7 error kinds.
//!
//! The core reports structured [`Diagnostic`] values; rendering them to a
//! terminal or editor is explicitly an external concern (spec.md §1), so
//! this module stops at structure plus a minimal `Display` impl good enough
//! for `tarac`'s "single line per error" policy (§7).

use std::fmt;

use tara_ir::Span;

use crate::label::Label;
use crate::severity::Severity;

/// The ten error concepts named in spec.md §7. Carried alongside the
/// human-readable message so callers (and tests) can match on error
/// identity without parsing text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Code {
    Io,
    Lex,
    OpDecl,
    Parse,
    Unbound,
    TypeMismatch,
    NotAFunction,
    NotMutable,
    BreakOutsideLoop,
    Oom,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Code::Io => "io",
            Code::Lex => "lex",
            Code::OpDecl => "op-decl",
            Code::Parse => "parse",
            Code::Unbound => "unbound",
            Code::TypeMismatch => "type-mismatch",
            Code::NotAFunction => "not-a-function",
            Code::NotMutable => "not-mutable",
            Code::BreakOutsideLoop => "break-outside-loop",
            Code::Oom => "oom",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Code,
    pub message: String,
    pub labels: Vec<Label>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: Code,
        message: impl Into<String>,
        primary_span: Span,
    ) -> Self {
        Diagnostic {
            severity,
            code,
            message: message.into(),
            labels: vec![Label::new(primary_span, String::new())],
        }
    }

    #[must_use]
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message.into()));
        self
    }

    pub fn primary_span(&self) -> Span {
        self.labels.first().map_or(Span::DUMMY, |l| l.span)
    }

    // --- spec.md §7 error-kind constructors ---

    pub fn lex(spelling: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::Lex,
            format!("unrecognized byte sequence: {spelling}"),
            span,
        )
    }

    pub fn op_decl(reason: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::OpDecl,
            format!("malformed operator declaration: {reason}"),
            span,
        )
    }

    pub fn duplicate_op_decl(spelling: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::OpDecl,
            format!("duplicate operator declaration for `{spelling}`"),
            span,
        )
    }

    pub fn parse(expected: impl fmt::Display, found: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::Parse,
            format!("expected {expected}, found {found}"),
            span,
        )
    }

    pub fn unbound(name: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::Unbound,
            format!("unbound identifier `{name}`"),
            span,
        )
    }

    pub fn type_mismatch(
        expected: impl fmt::Display,
        found: impl fmt::Display,
        span: Span,
    ) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::TypeMismatch,
            format!("expected type `{expected}`, found `{found}`"),
            span,
        )
    }

    pub fn not_a_function(found: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::NotAFunction,
            format!("expected a function type, found `{found}`"),
            span,
        )
    }

    pub fn not_mutable(name: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::NotMutable,
            format!("cannot assign to immutable binding `{name}`"),
            span,
        )
    }

    pub fn break_outside_loop(span: Span) -> Self {
        Diagnostic::new(
            Severity::Error,
            Code::BreakOutsideLoop,
            "`break` outside of a loop".to_string(),
            span,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_renders_both_types() {
        let d = Diagnostic::type_mismatch("int", "bool", Span::DUMMY);
        assert!(d.message.contains("int"));
        assert!(d.message.contains("bool"));
        assert_eq!(d.code, Code::TypeMismatch);
    }
}
