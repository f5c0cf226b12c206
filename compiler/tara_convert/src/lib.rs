//! AST → TST conversion (spec.md §4.6).
//!
//! Consumes a type-checked [`tara_ir::Ast`] (every `Expr.ty` already filled
//! in by `tara_typeck`) and produces a [`Tst`], resolving names to slots and
//! flattening tuple destructuring along the way.

mod lower;
mod tst;

pub use lower::convert;
pub use tst::{Reference, Tst, TstExpr, TstExprId, TstExprKind, TstExprRange, TstFunction};
