//! The operator scanner (spec.md §4.2) and Pratt expression parser (§4.4)
//! for the Tara compiler.

pub mod binding;
pub mod cursor;
pub mod expr;
pub mod function;
pub mod opdecls;
pub mod scanner;
pub mod ty;

pub use cursor::Cursor;
pub use expr::{parse_block, parse_expr, ParseCx};
pub use function::parse_ast;
pub use opdecls::{Assoc, InfixInfo, Opdecls};
pub use scanner::scan;

#[cfg(test)]
mod tests {
    use super::*;
    use tara_diagnostic::Queue;
    use tara_ir::{ExprKind, Interner, Symbols};
    use tara_types::TypeInterner;

    /// End-to-end spec.md §8 scenario 6: a user-declared operator parses
    /// into `Call(Recall("+"), Tuple[x, x])`.
    #[test]
    fn lex_scan_parse_pipeline_handles_user_operators() {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let types = TypeInterner::new(&symbols);
        let mut diags = Queue::new();
        let src = "infix 6 left + func g(x: int): int x + x";
        let tokens = tara_lexer::lex(src, &interner, &mut diags).unwrap();
        let (tokens, ops) = scan(&tokens, &interner, &symbols, &mut diags).unwrap();
        let ast = parse_ast(&tokens, &interner, &types, &symbols, &ops, &mut diags).unwrap();
        assert!(diags.is_empty());
        let f = &ast.functions[0];
        match &ast.expr(f.body).kind {
            ExprKind::Call { args, .. } => match &ast.expr(*args).kind {
                ExprKind::Tuple(range) => assert_eq!(range.len(), 2),
                other => panic!("expected Tuple, got {other:?}"),
            },
            other => panic!("expected Call, got {other:?}"),
        }
    }
}
