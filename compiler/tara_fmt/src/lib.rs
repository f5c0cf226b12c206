//! Deterministic pretty-printer for the Tara `Ast` (spec.md §8 testable
//! property #2: "pretty-printing a parsed `Ast` and reparsing it yields an
//! `Ast` that pretty-prints identically").
//!
//! Grounded in `original_source/src/ast.c`'s `Expr_print`/`Binding_print`/
//! `Type_print` family (SPEC_FULL.md §C.4): parenthesized tuples with `, `
//! separated elements, `func NAME(binding): type body` function headers,
//! 2-space indentation for block bodies. Used both for the round-trip
//! property test and for rendering `TypeId`s in diagnostics in place of
//! `check.rs`'s current `{ty:?}` placeholder.

mod printer;
mod type_print;

pub use printer::{print_ast, print_expr, print_function};
pub use type_print::print_type;
