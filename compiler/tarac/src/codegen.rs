//! The `CodeGen` seam (spec.md §6: "Consumes a `Tst` and emits an LLVM
//! module; the core guarantees every node type is non-null and every name
//! reference is resolved").
//!
//! Native code generation is explicitly out of scope (spec.md §1): this
//! module defines the trait a real LLVM backend would implement and a
//! placeholder that proves the seam is wired end to end without linking
//! LLVM into this workspace.

use tara_convert::Tst;
use tara_ir::Interner;
use tara_types::TypeInterner;

/// Consumes a fully type-checked, converted [`Tst`] and produces an object
/// file's bytes.
pub trait CodeGen {
    fn emit(&self, tst: &Tst, types: &TypeInterner, interner: &Interner) -> Vec<u8>;
}

/// Renders a human-readable stand-in for an object file: one line per
/// function naming its slot count, with no actual machine code. Lets
/// `tara` exercise its full pipeline — including writing `out.o` — without
/// a real backend.
pub struct PlaceholderCodeGen;

impl CodeGen for PlaceholderCodeGen {
    fn emit(&self, tst: &Tst, _types: &TypeInterner, interner: &Interner) -> Vec<u8> {
        let mut text = String::new();
        for function in &tst.functions {
            text.push_str(&interner.resolve(function.name));
            text.push_str(": slots=");
            text.push_str(&function.slot_count.to_string());
            text.push('\n');
        }
        text.into_bytes()
    }
}
