//! `type ::= NAME | type '->' type | NAME '(' type ')' | '(' type (',' type)+ ')'`
//! (spec.md §4.4). Types are interned as they're parsed (§4.4: "Types
//! encountered during parsing are interned immediately").

use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Interner, TokenKind, TypeId};
use tara_types::TypeInterner;

use crate::cursor::Cursor;

pub fn parse_type(
    cursor: &mut Cursor<'_>,
    interner: &Interner,
    types: &TypeInterner,
    diags: &mut Queue,
) -> Result<TypeId, ErrorGuaranteed> {
    let lhs = parse_type_primary(cursor, interner, types, diags)?;
    if cursor.check_punct(interner, "->") {
        cursor.bump();
        // Right-recursion makes `->` right-associative: `a -> b -> c` is
        // `a -> (b -> c)`.
        let rhs = parse_type(cursor, interner, types, diags)?;
        return Ok(types.func(lhs, rhs));
    }
    Ok(lhs)
}

fn parse_type_primary(
    cursor: &mut Cursor<'_>,
    interner: &Interner,
    types: &TypeInterner,
    diags: &mut Queue,
) -> Result<TypeId, ErrorGuaranteed> {
    let tok = cursor.peek();

    if tok.kind == TokenKind::Ident {
        cursor.bump();
        let name_ty = types.recall(tok.spelling);
        if cursor.check_punct(interner, "(") {
            cursor.bump();
            let args = parse_type(cursor, interner, types, diags)?;
            expect_punct(cursor, interner, ")", diags)?;
            return Ok(types.call(name_ty, args));
        }
        return Ok(name_ty);
    }

    if tok.kind == TokenKind::Punct && &*interner.resolve(tok.spelling) == "(" {
        cursor.bump();
        let first = parse_type(cursor, interner, types, diags)?;
        let mut elems = vec![first];
        let mut saw_comma = false;
        while cursor.check_punct(interner, ",") {
            saw_comma = true;
            cursor.bump();
            elems.push(parse_type(cursor, interner, types, diags)?);
        }
        expect_punct(cursor, interner, ")", diags)?;
        if saw_comma {
            // spec.md §3 invariant: "products of arity >= 2 are represented
            // as `Call(name = t_star, args = Tuple[...])`" — `(T1, T2)` is
            // sugar for `*(T1, T2)`, so both must intern to the same `TypeId`.
            let product = types.tuple(elems);
            return Ok(types.call(types.well_known.star, product));
        }
        // `( type )` with no comma is pure grouping, not a one-element
        // tuple (spec.md §3: tuples of arity 1 are forbidden).
        return Ok(elems.into_iter().next().expect("pushed above"));
    }

    Err(diags.error(Diagnostic::parse("a type", "something else", tok.span)))
}

fn expect_punct(
    cursor: &mut Cursor<'_>,
    interner: &Interner,
    spelling: &str,
    diags: &mut Queue,
) -> Result<(), ErrorGuaranteed> {
    if cursor.check_punct(interner, spelling) {
        cursor.bump();
        Ok(())
    } else {
        let tok = cursor.peek();
        Err(diags.error(Diagnostic::parse(format!("`{spelling}`"), "something else", tok.span)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_diagnostic::Queue;
    use tara_ir::Symbols;
    use tara_types::TypeData;

    fn parse(src: &str) -> (TypeId, TypeInterner) {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let mut diags = Queue::new();
        let tokens = tara_lexer::lex(src, &interner, &mut diags).unwrap();
        let mut cursor = Cursor::new(&tokens);
        let ty = parse_type(&mut cursor, &interner, &types, &mut diags).unwrap();
        (ty, types)
    }

    #[test]
    fn arrow_is_right_associative() {
        let (ty, types) = parse("int -> int -> bool");
        match &*types.get(ty) {
            TypeData::Func { ret, .. } => {
                assert!(matches!(&*types.get(*ret), TypeData::Func { .. }));
            }
            other => panic!("expected Func, got {other:?}"),
        }
    }

    #[test]
    fn star_call_of_pair_builds_product_type() {
        let (ty, types) = parse("*(int, bool)");
        match &*types.get(ty) {
            TypeData::Call { args, .. } => {
                assert!(matches!(&*types.get(*args), TypeData::Tuple(_)));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_single_type_is_grouping_not_tuple() {
        let (ty, types) = parse("(int)");
        assert_eq!(ty, types.well_known.int);
    }
}
