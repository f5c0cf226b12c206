//! Renders a canonical `TypeId` back into `type` surface syntax (spec.md
//! §4.4 grammar: `type ::= NAME | type '->' type | NAME '(' type ')' |
//! '(' type (',' type)+ ')'`).

use tara_ir::{Interner, TypeId};
use tara_types::{TypeData, TypeInterner};

/// Prints `ty` as it would have to be written to parse back to the same
/// `TypeId` (modulo whitespace) — used both by `tara_fmt`'s own function
/// printer and by `tara_typeck` diagnostics in place of a raw `{ty:?}`.
pub fn print_type(ty: TypeId, types: &TypeInterner, interner: &Interner) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, types, interner);
    out
}

fn write_type(out: &mut String, ty: TypeId, types: &TypeInterner, interner: &Interner) {
    match &*types.get(ty) {
        TypeData::Recall(name) => out.push_str(&interner.resolve(*name)),
        TypeData::Func { args, ret } => {
            write_type_atom(out, *args, types, interner);
            out.push_str(" -> ");
            write_type(out, *ret, types, interner);
        }
        TypeData::Call { name, args } if *name == types.well_known.star => {
            // Product sugar: `*(T1, T2)` prints as the bare parenthesized
            // form the parser also accepts for it (spec.md §4.4).
            write_tuple_elems(out, *args, types, interner);
        }
        TypeData::Call { name, args } => {
            write_type(out, *name, types, interner);
            out.push('(');
            write_type(out, *args, types, interner);
            out.push(')');
        }
        TypeData::Tuple(elems) if elems.is_empty() => out.push_str("()"),
        TypeData::Tuple(_) => write_tuple_elems(out, ty, types, interner),
    }
}

/// Wraps `ty` in parens if it's a `Func`, since `a -> b -> c` already
/// right-associates and `(a -> b) -> c` needs explicit grouping to mean
/// something different.
fn write_type_atom(out: &mut String, ty: TypeId, types: &TypeInterner, interner: &Interner) {
    if matches!(&*types.get(ty), TypeData::Func { .. }) {
        out.push('(');
        write_type(out, ty, types, interner);
        out.push(')');
    } else {
        write_type(out, ty, types, interner);
    }
}

fn write_tuple_elems(out: &mut String, tuple_ty: TypeId, types: &TypeInterner, interner: &Interner) {
    let TypeData::Tuple(elems) = &*types.get(tuple_ty) else {
        panic!("write_tuple_elems called on a non-Tuple TypeId");
    };
    out.push('(');
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(out, *elem, types, interner);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_ir::Symbols;

    fn fresh() -> (Interner, TypeInterner) {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        (interner, types)
    }

    #[test]
    fn prints_primitive_recall() {
        let (interner, types) = fresh();
        assert_eq!(print_type(types.well_known.int, &types, &interner), "int");
    }

    #[test]
    fn prints_arrow_right_associative() {
        let (interner, types) = fresh();
        let inner = types.func(types.well_known.int, types.well_known.bool_);
        let ty = types.func(types.well_known.int, inner);
        assert_eq!(print_type(ty, &types, &interner), "int -> int -> bool");
    }

    #[test]
    fn parenthesizes_func_typed_argument() {
        let (interner, types) = fresh();
        let arg_fn = types.func(types.well_known.int, types.well_known.bool_);
        let ty = types.func(arg_fn, types.well_known.int);
        assert_eq!(print_type(ty, &types, &interner), "(int -> bool) -> int");
    }

    #[test]
    fn prints_star_product_as_tuple_sugar() {
        let (interner, types) = fresh();
        let product = types.tuple([types.well_known.int, types.well_known.bool_]);
        let ty = types.call(types.well_known.star, product);
        assert_eq!(print_type(ty, &types, &interner), "(int, bool)");
    }

    #[test]
    fn prints_unit_as_empty_parens() {
        let (interner, types) = fresh();
        assert_eq!(print_type(types.well_known.unit, &types, &interner), "()");
    }
}
