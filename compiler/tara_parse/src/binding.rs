//! `binding ::= '(' [binding (',' binding)*] ')' | NAME ':' type | ε`
//! (spec.md §4.4).

use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Ast, Binding, BindingId, Interner, TokenKind};
use tara_types::TypeInterner;

use crate::cursor::Cursor;
use crate::ty::parse_type;

/// Parses a binding, allocating it (and any nested tuple children) into
/// `ast.bindings`. A single parenthesized child (`(x: int)`) is unwrapped
/// rather than represented as a one-element `Tuple`, matching the type
/// layer's "arity ≥ 2" rule for products (spec.md §3).
pub fn parse_binding(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    interner: &Interner,
    types: &TypeInterner,
    diags: &mut Queue,
) -> Result<BindingId, ErrorGuaranteed> {
    let value = parse_binding_value(ast, cursor, interner, types, diags)?;
    Ok(ast.bindings.alloc(value))
}

fn parse_binding_value(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    interner: &Interner,
    types: &TypeInterner,
    diags: &mut Queue,
) -> Result<Binding, ErrorGuaranteed> {
    if cursor.check_punct(interner, "(") {
        cursor.bump();
        let mut items = Vec::new();
        if !cursor.check_punct(interner, ")") {
            loop {
                items.push(parse_binding_value(ast, cursor, interner, types, diags)?);
                if cursor.check_punct(interner, ",") {
                    cursor.bump();
                } else {
                    break;
                }
            }
        }
        if !cursor.check_punct(interner, ")") {
            let tok = cursor.peek();
            return Err(diags.error(Diagnostic::parse("`)`", "something else", tok.span)));
        }
        cursor.bump();
        return Ok(match items.len() {
            0 => Binding::Empty,
            1 => items.into_iter().next().expect("length checked above"),
            _ => {
                let range = ast.bindings.alloc_range(items);
                Binding::Tuple(range)
            }
        });
    }

    let tok = cursor.peek();
    if tok.kind == TokenKind::Ident {
        cursor.bump();
        if !cursor.check_punct(interner, ":") {
            let found = cursor.peek();
            return Err(diags.error(Diagnostic::parse("`:`", "something else", found.span)));
        }
        cursor.bump();
        let annot = parse_type(cursor, interner, types, diags)?;
        return Ok(Binding::Name {
            name: tok.spelling,
            annot,
            span: tok.span,
        });
    }

    // ε: no parameters, no annotation — used when a binding position is
    // immediately followed by whatever comes next in the grammar (e.g. a
    // function's `:` before its return type with no `()` at all).
    Ok(Binding::Empty)
}
