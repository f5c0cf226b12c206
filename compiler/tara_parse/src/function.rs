//! `function ::= 'func' NAME binding ':' type expr` (spec.md §4.4) and the
//! top-level driver that turns a whole token buffer into an [`Ast`].

use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Ast, Function, Interner, Symbols, TokenKind};
use tara_types::TypeInterner;

use crate::binding::parse_binding;
use crate::cursor::Cursor;
use crate::expr::{parse_expr, ParseCx};
use crate::opdecls::Opdecls;
use crate::ty::parse_type;

/// Parses one `func` declaration.
fn parse_function(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<Function, ErrorGuaranteed> {
    let kw = cursor.peek();
    if kw.kind != TokenKind::Ident || kw.spelling != cx.symbols.kw_func {
        return Err(diags.error(Diagnostic::parse("`func`", "something else", kw.span)));
    }
    cursor.bump();

    let name_tok = cursor.peek();
    if name_tok.kind != TokenKind::Ident {
        return Err(diags.error(Diagnostic::parse(
            "a function name",
            "something else",
            name_tok.span,
        )));
    }
    cursor.bump();

    let args = parse_binding(ast, cursor, cx.interner, cx.types, diags)?;

    if !cursor.check_punct(cx.interner, ":") {
        let tok = cursor.peek();
        return Err(diags.error(Diagnostic::parse("`:`", "something else", tok.span)));
    }
    cursor.bump();

    let ret = parse_type(cursor, cx.interner, cx.types, diags)?;
    let body = parse_expr(ast, cursor, cx, diags)?;
    let span = kw.span.merge(ast.expr(body).span);

    Ok(Function {
        name: name_tok.spelling,
        args,
        ret,
        body,
        span,
    })
}

/// Parses every `func` declaration in `tokens` (already scanner-stripped of
/// operator declarations, spec.md §4.2) into an [`Ast`].
///
/// Per spec.md §4.5's "collect and continue" policy for the type checker,
/// the parser itself aborts its stage on the first malformed construct
/// (§7: "`Parse` ... abort their stage (no recovery within stage)"), so this
/// simply stops at the first error rather than attempting statement-level
/// recovery between functions.
pub fn parse_ast(
    tokens: &[tara_ir::Token],
    interner: &Interner,
    types: &TypeInterner,
    symbols: &Symbols,
    ops: &Opdecls,
    diags: &mut Queue,
) -> Result<Ast, ErrorGuaranteed> {
    let mut ast = Ast::new();
    let mut cursor = Cursor::new(tokens);
    let cx = ParseCx {
        interner,
        types,
        symbols,
        ops,
    };
    while !cursor.is_eof() {
        let function = parse_function(&mut ast, &mut cursor, &cx, diags)?;
        ast.functions.push(function);
    }
    Ok(ast)
}
