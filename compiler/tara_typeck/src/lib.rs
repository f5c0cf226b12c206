//! Bidirectional type checker / inferencer (spec.md §4.5).
//!
//! Walks a parsed [`tara_ir::Ast`], assigning each expression node its
//! canonical interned type and verifying bindings, mutability, return,
//! break, and assignment are well-typed in place. The checker never
//! constructs new structure in the `Ast`; it only fills `Expr.ty` slots and
//! pushes diagnostics.

mod check;
mod env;
mod stack;

pub use check::typecheck;
