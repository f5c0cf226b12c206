//! Expression and statement parsing (spec.md §4.4):
//!
//! ```text
//! expr ::= prefix { infix }*                      (Pratt, driven by `Opdecls`)
//! stmt ::= 'let' binding '=' expr
//!        | 'mut' binding '=' expr
//!        | 'break' expr
//!        | 'return' expr
//!        | NAME '=' expr
//!        | expr
//!          terminated by ';'
//! block ::= '{' stmt* '}'
//! if-expr ::= 'if' expr block 'else' (block | if-expr)
//! loop-expr ::= 'loop' block
//! ```
//!
//! A trailing non-terminated expression is a block's value; otherwise the
//! block yields unit. Operator application desugars directly into `Call`
//! (§4.4: "Operator application produces `Call{callee = Recall(opname),
//! args = Tuple[lhs, rhs]}`. Unary prefix ops produce `Call{callee =
//! Recall(opname), args = operand}`").

use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Ast, Expr, ExprId, ExprKind, Interner, Symbols, TokenKind};
use tara_types::TypeInterner;

use crate::binding::parse_binding;
use crate::cursor::Cursor;
use crate::opdecls::{Assoc, Opdecls};

pub struct ParseCx<'a> {
    pub interner: &'a Interner,
    pub types: &'a TypeInterner,
    pub symbols: &'a Symbols,
    pub ops: &'a Opdecls,
}

fn binding_power(precedence: u8, assoc: Assoc) -> (u16, u16) {
    let p = u16::from(precedence) * 2;
    match assoc {
        Assoc::Left => (p, p + 1),
        Assoc::Right => (p + 1, p),
        Assoc::None => (p, p),
    }
}

pub fn parse_expr(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<ExprId, ErrorGuaranteed> {
    parse_expr_bp(ast, cursor, cx, diags, 0, None)
}

fn parse_expr_bp(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
    min_bp: u16,
    mut prev_none_precedence: Option<u8>,
) -> Result<ExprId, ErrorGuaranteed> {
    let primary = parse_prefix(ast, cursor, cx, diags)?;
    let mut lhs = parse_call_chain(ast, cursor, cx, diags, primary)?;

    loop {
        let tok = cursor.peek();
        let is_op_token = tok.kind == TokenKind::Punct || tok.kind == TokenKind::Ident;
        if !is_op_token {
            break;
        }
        let Some(info) = cx.ops.infix(tok.spelling) else {
            break;
        };
        let (l_bp, r_bp) = binding_power(info.precedence, info.assoc);
        if l_bp < min_bp {
            break;
        }
        // GLOSSARY/§9 open question: "the source does not document behavior
        // on two adjacent `none`-ops of equal precedence; treat as a parse
        // error." Extended here to any chain touching a `none` operator at
        // a precedence already seen in this chain.
        if prev_none_precedence == Some(info.precedence) {
            return Err(diags.error(Diagnostic::parse(
                "a non-`none`-associative continuation",
                "another operator at the same precedence as a preceding `none` operator",
                tok.span,
            )));
        }
        prev_none_precedence = if info.assoc == Assoc::None {
            Some(info.precedence)
        } else {
            None
        };

        cursor.bump();
        let rhs = parse_expr_bp(ast, cursor, cx, diags, r_bp, None)?;
        let span = ast.expr(lhs).span.merge(ast.expr(rhs).span);
        let args = ast
            .exprs
            .alloc_range([ast.expr(lhs).clone(), ast.expr(rhs).clone()]);
        let args_expr = ast.exprs.alloc(Expr::new(ExprKind::Tuple(args), span));
        let callee = ast
            .exprs
            .alloc(Expr::new(ExprKind::Recall(tok.spelling), tok.span));
        lhs = ast.exprs.alloc(Expr::new(
            ExprKind::Call {
                callee,
                args: args_expr,
            },
            span,
        ));
    }

    Ok(lhs)
}

fn parse_prefix(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<ExprId, ErrorGuaranteed> {
    let tok = cursor.peek();

    match tok.kind {
        TokenKind::Number => {
            cursor.bump();
            return Ok(ast
                .exprs
                .alloc(Expr::new(ExprKind::NumberLit(tok.spelling), tok.span)));
        }
        TokenKind::String => {
            cursor.bump();
            return Ok(ast
                .exprs
                .alloc(Expr::new(ExprKind::StringLit(tok.spelling), tok.span)));
        }
        _ => {}
    }

    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_true {
        cursor.bump();
        return Ok(ast.exprs.alloc(Expr::new(ExprKind::BoolLit(true), tok.span)));
    }
    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_false {
        cursor.bump();
        return Ok(ast.exprs.alloc(Expr::new(ExprKind::BoolLit(false), tok.span)));
    }
    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_if {
        return parse_if(ast, cursor, cx, diags);
    }
    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_loop {
        cursor.bump();
        let body = parse_block(ast, cursor, cx, diags)?;
        let span = tok.span.merge(ast.expr(body).span);
        return Ok(ast.exprs.alloc(Expr::new(ExprKind::Loop { body }, span)));
    }
    if cursor.check_punct(cx.interner, "{") {
        return parse_block(ast, cursor, cx, diags);
    }
    if cursor.check_punct(cx.interner, "(") {
        return parse_paren_expr(ast, cursor, cx, diags);
    }

    if let Some(prec) = cx.ops.prefix(tok.spelling) {
        cursor.bump();
        let (_, r_bp) = binding_power(prec, Assoc::Right);
        let operand = parse_expr_bp(ast, cursor, cx, diags, r_bp, None)?;
        let span = tok.span.merge(ast.expr(operand).span);
        let callee = ast
            .exprs
            .alloc(Expr::new(ExprKind::Recall(tok.spelling), tok.span));
        return Ok(ast.exprs.alloc(Expr::new(
            ExprKind::Call {
                callee,
                args: operand,
            },
            span,
        )));
    }

    if tok.kind == TokenKind::Ident {
        cursor.bump();
        return Ok(ast
            .exprs
            .alloc(Expr::new(ExprKind::Recall(tok.spelling), tok.span)));
    }

    Err(diags.error(Diagnostic::parse("an expression", "something else", tok.span)))
}

/// Postfix function application: `primary '(' [expr (',' expr)*] ')'`,
/// chained so `f(x)(y)` parses as `Call(Call(f, x), y)`. Grounded on
/// `original_source/src/ast.c`'s `print_ET_Call` (`name(args)`), which shows
/// `Expr::Call` is reachable from ordinary named-function application, not
/// only from the desugared `infix`/`prefix` operator spellings `parse_expr_bp`
/// and `parse_prefix` already produce. Binds tighter than any infix operator:
/// `f(x) + 1` is `(f(x)) + 1`.
fn parse_call_chain(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
    mut callee: ExprId,
) -> Result<ExprId, ErrorGuaranteed> {
    while cursor.check_punct(cx.interner, "(") {
        callee = parse_call_args(ast, cursor, cx, diags, callee)?;
    }
    Ok(callee)
}

fn parse_call_args(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
    callee: ExprId,
) -> Result<ExprId, ErrorGuaranteed> {
    let open = cursor.peek();
    cursor.bump();
    let mut arg_ids = Vec::new();
    if !cursor.check_punct(cx.interner, ")") {
        loop {
            arg_ids.push(parse_expr(ast, cursor, cx, diags)?);
            if cursor.check_punct(cx.interner, ",") {
                cursor.bump();
            } else {
                break;
            }
        }
    }
    if !cursor.check_punct(cx.interner, ")") {
        let tok = cursor.peek();
        return Err(diags.error(Diagnostic::parse("`)`", "something else", tok.span)));
    }
    let close = cursor.peek();
    cursor.bump();
    let span = ast.expr(callee).span.merge(close.span);
    // §3 invariant: no arity-1 tuple. Zero args is unit, one arg is that
    // arg's own expression (not wrapped), two or more is a `Tuple`.
    let args = match arg_ids.len() {
        0 => ast
            .exprs
            .alloc(Expr::new(ExprKind::Unit, open.span.merge(close.span))),
        1 => arg_ids[0],
        _ => {
            let elems: Vec<Expr> = arg_ids.iter().map(|&id| ast.expr(id).clone()).collect();
            let range = ast.exprs.alloc_range(elems);
            ast.exprs.alloc(Expr::new(ExprKind::Tuple(range), span))
        }
    };
    Ok(ast.exprs.alloc(Expr::new(ExprKind::Call { callee, args }, span)))
}

fn parse_paren_expr(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<ExprId, ErrorGuaranteed> {
    let open = cursor.peek();
    cursor.bump();
    if cursor.check_punct(cx.interner, ")") {
        let close = cursor.peek();
        cursor.bump();
        return Ok(ast
            .exprs
            .alloc(Expr::new(ExprKind::Unit, open.span.merge(close.span))));
    }
    let first = parse_expr(ast, cursor, cx, diags)?;
    let mut elems = vec![ast.expr(first).clone()];
    let mut saw_comma = false;
    while cursor.check_punct(cx.interner, ",") {
        saw_comma = true;
        cursor.bump();
        let next = parse_expr(ast, cursor, cx, diags)?;
        elems.push(ast.expr(next).clone());
    }
    if !cursor.check_punct(cx.interner, ")") {
        let tok = cursor.peek();
        return Err(diags.error(Diagnostic::parse("`)`", "something else", tok.span)));
    }
    let close = cursor.peek();
    cursor.bump();
    let span = open.span.merge(close.span);
    if saw_comma {
        let range = ast.exprs.alloc_range(elems);
        Ok(ast.exprs.alloc(Expr::new(ExprKind::Tuple(range), span)))
    } else {
        // `( expr )` with no comma is grouping, not a one-element tuple.
        Ok(first)
    }
}

fn parse_if(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<ExprId, ErrorGuaranteed> {
    let kw = cursor.peek();
    cursor.bump();
    let cond = parse_expr(ast, cursor, cx, diags)?;
    let then_branch = parse_block(ast, cursor, cx, diags)?;
    let else_tok = cursor.peek();
    if else_tok.kind != TokenKind::Ident || else_tok.spelling != cx.symbols.kw_else {
        return Err(diags.error(Diagnostic::parse("`else`", "something else", else_tok.span)));
    }
    cursor.bump();
    let else_branch = if cursor.check_punct(cx.interner, "{") {
        parse_block(ast, cursor, cx, diags)?
    } else if cursor.peek().kind == TokenKind::Ident && cursor.peek().spelling == cx.symbols.kw_if
    {
        parse_if(ast, cursor, cx, diags)?
    } else {
        let tok = cursor.peek();
        return Err(diags.error(Diagnostic::parse(
            "a block or `if`",
            "something else",
            tok.span,
        )));
    };
    let span = kw.span.merge(ast.expr(else_branch).span);
    Ok(ast.exprs.alloc(Expr::new(
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        },
        span,
    )))
}

/// `block ::= '{' stmt* '}'`. Leading statements must each be terminated by
/// `;`; a final, non-terminated expression becomes the block's value.
pub fn parse_block(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<ExprId, ErrorGuaranteed> {
    let open = cursor.peek();
    if !cursor.check_punct(cx.interner, "{") {
        return Err(diags.error(Diagnostic::parse("`{`", "something else", open.span)));
    }
    cursor.bump();

    let mut exprs = Vec::new();
    loop {
        if cursor.check_punct(cx.interner, "}") {
            break;
        }
        if cursor.is_eof() {
            return Err(diags.error(Diagnostic::parse(
                "`}`, found end of file",
                "end of file",
                cursor.span(),
            )));
        }
        let (stmt_id, terminated) = parse_stmt(ast, cursor, cx, diags)?;
        exprs.push(ast.expr(stmt_id).clone());
        if !terminated {
            if cursor.check_punct(cx.interner, "}") {
                break;
            }
            let tok = cursor.peek();
            return Err(diags.error(Diagnostic::parse("`;`", "something else", tok.span)));
        }
    }
    let close = cursor.peek();
    cursor.bump();
    let span = open.span.merge(close.span);
    let range = ast.exprs.alloc_range(exprs);
    Ok(ast.exprs.alloc(Expr::new(ExprKind::Bareblock(range), span)))
}

/// Parses one statement. Returns `(expr, terminated)` where `terminated` is
/// true iff the statement was consumed up to and including a `;`.
fn parse_stmt(
    ast: &mut Ast,
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<(ExprId, bool), ErrorGuaranteed> {
    let tok = cursor.peek();

    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_let {
        cursor.bump();
        let bind = parse_binding(ast, cursor, cx.interner, cx.types, diags)?;
        expect_eq(cursor, cx, diags)?;
        let init = parse_expr(ast, cursor, cx, diags)?;
        let span = tok.span.merge(ast.expr(init).span);
        let id = ast
            .exprs
            .alloc(Expr::new(ExprKind::Let { bind, init }, span));
        return Ok((id, expect_semi(cursor, cx, diags)?));
    }

    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_mut {
        cursor.bump();
        let bind = parse_binding(ast, cursor, cx.interner, cx.types, diags)?;
        expect_eq(cursor, cx, diags)?;
        let init = parse_expr(ast, cursor, cx, diags)?;
        let span = tok.span.merge(ast.expr(init).span);
        let id = ast
            .exprs
            .alloc(Expr::new(ExprKind::Mut { bind, init }, span));
        return Ok((id, expect_semi(cursor, cx, diags)?));
    }

    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_break {
        cursor.bump();
        let value = parse_expr(ast, cursor, cx, diags)?;
        let span = tok.span.merge(ast.expr(value).span);
        let id = ast.exprs.alloc(Expr::new(ExprKind::Break { value }, span));
        return Ok((id, expect_semi(cursor, cx, diags)?));
    }

    if tok.kind == TokenKind::Ident && tok.spelling == cx.symbols.kw_return {
        cursor.bump();
        let value = parse_expr(ast, cursor, cx, diags)?;
        let span = tok.span.merge(ast.expr(value).span);
        let id = ast.exprs.alloc(Expr::new(ExprKind::Return { value }, span));
        return Ok((id, expect_semi(cursor, cx, diags)?));
    }

    // NAME '=' expr — plain assignment, distinguished from a bare Recall
    // expression-statement by a one-token lookahead for a literal `=`.
    if tok.kind == TokenKind::Ident
        && !cx.ops.is_operator(tok.spelling)
        && cursor.peek_at(1).kind == TokenKind::Punct
        && &*cx.interner.resolve(cursor.peek_at(1).spelling) == "="
    {
        cursor.bump();
        cursor.bump();
        let value = parse_expr(ast, cursor, cx, diags)?;
        let span = tok.span.merge(ast.expr(value).span);
        let id = ast.exprs.alloc(Expr::new(
            ExprKind::Assign {
                name: tok.spelling,
                value,
            },
            span,
        ));
        return Ok((id, expect_semi(cursor, cx, diags)?));
    }

    let e = parse_expr(ast, cursor, cx, diags)?;
    if cursor.check_punct(cx.interner, ";") {
        cursor.bump();
        let span = ast.expr(e).span;
        let id = ast.exprs.alloc(Expr::new(ExprKind::Const { expr: e }, span));
        return Ok((id, true));
    }
    Ok((e, false))
}

fn expect_eq(
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<(), ErrorGuaranteed> {
    if cursor.check_punct(cx.interner, "=") {
        cursor.bump();
        Ok(())
    } else {
        let tok = cursor.peek();
        Err(diags.error(Diagnostic::parse("`=`", "something else", tok.span)))
    }
}

fn expect_semi(
    cursor: &mut Cursor<'_>,
    cx: &ParseCx<'_>,
    diags: &mut Queue,
) -> Result<bool, ErrorGuaranteed> {
    if cursor.check_punct(cx.interner, ";") {
        cursor.bump();
        Ok(true)
    } else {
        let tok = cursor.peek();
        Err(diags.error(Diagnostic::parse("`;`", "something else", tok.span)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_diagnostic::Queue;

    fn parse_body(src: &str) -> (Ast, ExprId) {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let mut diags = Queue::new();
        let tokens = tara_lexer::lex(src, &interner, &mut diags).unwrap();
        let (tokens, ops) = crate::scanner::scan(&tokens, &interner, &symbols, &mut diags).unwrap();
        let mut cursor = Cursor::new(&tokens);
        let mut ast = Ast::new();
        let cx = ParseCx {
            interner: &interner,
            types: &types,
            symbols: &symbols,
            ops: &ops,
        };
        let id = parse_expr(&mut ast, &mut cursor, &cx, &mut diags).unwrap();
        assert!(diags.is_empty(), "unexpected diagnostics");
        (ast, id)
    }

    #[test]
    fn user_operator_desugars_to_call_of_tuple() {
        let (ast, id) = {
            let interner = Interner::new();
            let symbols = Symbols::new(&interner);
            let types = TypeInterner::new(&symbols);
            let mut diags = Queue::new();
            let tokens = tara_lexer::lex("infix 6 left + x + x", &interner, &mut diags).unwrap();
            let (tokens, ops) =
                crate::scanner::scan(&tokens, &interner, &symbols, &mut diags).unwrap();
            let mut cursor = Cursor::new(&tokens);
            let mut ast = Ast::new();
            let cx = ParseCx {
                interner: &interner,
                types: &types,
                symbols: &symbols,
                ops: &ops,
            };
            let id = parse_expr(&mut ast, &mut cursor, &cx, &mut diags).unwrap();
            (ast, id)
        };
        match &ast.expr(id).kind {
            ExprKind::Call { args, .. } => match &ast.expr(*args).kind {
                ExprKind::Tuple(range) => assert_eq!(range.len(), 2),
                other => panic!("expected Tuple args, got {other:?}"),
            },
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn paren_pair_is_tuple_in_source_order() {
        let (ast, id) = parse_body("(x, y)");
        match &ast.expr(id).kind {
            ExprKind::Tuple(range) => assert_eq!(range.len(), 2),
            other => panic!("expected Tuple, got {other:?}"),
        }
    }

    #[test]
    fn single_parenthesized_expr_is_grouping() {
        let (ast, id) = parse_body("(x)");
        assert!(matches!(&ast.expr(id).kind, ExprKind::Recall(_)));
    }

    #[test]
    fn call_with_two_args_wraps_them_in_a_tuple() {
        let (ast, id) = parse_body("pair(x, y)");
        match &ast.expr(id).kind {
            ExprKind::Call { callee, args } => {
                assert!(matches!(&ast.expr(*callee).kind, ExprKind::Recall(_)));
                match &ast.expr(*args).kind {
                    ExprKind::Tuple(range) => assert_eq!(range.len(), 2),
                    other => panic!("expected Tuple args, got {other:?}"),
                }
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn call_with_one_arg_does_not_wrap_it_in_a_tuple() {
        let (ast, id) = parse_body("id(x)");
        match &ast.expr(id).kind {
            ExprKind::Call { args, .. } => {
                assert!(matches!(&ast.expr(*args).kind, ExprKind::Recall(_)));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn call_with_no_args_has_unit_args() {
        let (ast, id) = parse_body("f()");
        match &ast.expr(id).kind {
            ExprKind::Call { args, .. } => {
                assert!(matches!(&ast.expr(*args).kind, ExprKind::Unit));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn chained_calls_nest_left_to_right() {
        let (ast, id) = parse_body("f(x)(y)");
        match &ast.expr(id).kind {
            ExprKind::Call { callee, .. } => {
                assert!(matches!(&ast.expr(*callee).kind, ExprKind::Call { .. }));
            }
            other => panic!("expected outer Call, got {other:?}"),
        }
    }

    #[test]
    fn call_binds_tighter_than_infix_operator() {
        let (ast, id) = {
            let interner = Interner::new();
            let symbols = Symbols::new(&interner);
            let types = TypeInterner::new(&symbols);
            let mut diags = Queue::new();
            let tokens =
                tara_lexer::lex("infix 6 left + f(x) + 1", &interner, &mut diags).unwrap();
            let (tokens, ops) =
                crate::scanner::scan(&tokens, &interner, &symbols, &mut diags).unwrap();
            let mut cursor = Cursor::new(&tokens);
            let mut ast = Ast::new();
            let cx = ParseCx {
                interner: &interner,
                types: &types,
                symbols: &symbols,
                ops: &ops,
            };
            let id = parse_expr(&mut ast, &mut cursor, &cx, &mut diags).unwrap();
            (ast, id)
        };
        // Outermost node is the `+` call; its lhs is the `f(x)` call.
        match &ast.expr(id).kind {
            ExprKind::Call { callee, args } => {
                assert!(matches!(&ast.expr(*callee).kind, ExprKind::Recall(_)));
                match &ast.expr(*args).kind {
                    ExprKind::Tuple(range) => {
                        let elems = ast.expr_range(*range);
                        assert!(matches!(elems[0].kind, ExprKind::Call { .. }));
                    }
                    other => panic!("expected Tuple args, got {other:?}"),
                }
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }
}
