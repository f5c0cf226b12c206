//! Result types for the portable compiler pipeline: the public interface
//! between [`crate::compile`] and its consumers (`tarac`, tests), carrying
//! everything a downstream `CodeGen` seam needs without exposing the five
//! pipeline crates' internals one by one.

use tara_diagnostic::Diagnostic;
use tara_ir::{Ast, Interner, Symbols};
use tara_types::TypeInterner;

/// Which compilation phase produced a fatal error (spec.md §7's error
/// kinds, grouped by which stage aborts on them).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorPhase {
    /// `Code::Lex`.
    Lex,
    /// `Code::OpDecl`.
    OpDecl,
    /// `Code::Parse`.
    Parse,
    /// `Code::Unbound`, `TypeMismatch`, `NotAFunction`, `NotMutable`,
    /// `BreakOutsideLoop`.
    Type,
}

/// Everything a `CodeGen` seam needs to lower a successful compilation:
/// the canonical name/type universes the `Tst` it emits was built against,
/// plus the typed `Ast` it was converted from (kept around for a host that
/// wants to re-render source with `tara_fmt`, e.g. for diagnostics or
/// debugging).
pub struct Artifacts {
    pub interner: Interner,
    pub symbols: Symbols,
    pub types: TypeInterner,
    pub ast: Ast,
    pub tst: tara_convert::Tst,
}

/// Result of compiling one logical source unit.
pub struct CompileOutput {
    pub success: bool,
    /// Present iff `success`; absent on any fatal error or collected type
    /// error (spec.md §7: "Any error at the end of the type-checking stage
    /// aborts the pipeline before conversion").
    pub artifacts: Option<Artifacts>,
    pub diagnostics: Vec<Diagnostic>,
    pub error_phase: Option<ErrorPhase>,
}
