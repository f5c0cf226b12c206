//! The operator scanner (spec.md §4.2): first pass over the raw token
//! stream. Copies every token into a contiguous buffer for the parser's
//! random-access use, pulling operator declarations out of that stream as
//! it goes.
//!
//! Declaration syntax, per spec.md §4.2: "a keyword followed by precedence
//! level, associativity `left|right|none`, and an identifier/operator
//! spelling." This implementation reads `infix PREC ASSOC SPELLING` and
//! `prefix PREC SPELLING` (prefix operators have no associativity — there
//! is nothing for a unary operator to associate with) and does not require
//! a terminator between declarations; a declaration token sequence is
//! excised from the buffer handed to the parser, since §4.2 scopes the
//! scanner to "does not balance parentheses or build expressions" and the
//! parser's grammar (§4.4) has no production for `infix`/`prefix` headers.

use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Interner, Symbols, Token, TokenKind};

use crate::opdecls::{Assoc, Opdecls};

pub fn scan(
    tokens: &[Token],
    interner: &Interner,
    symbols: &Symbols,
    diags: &mut Queue,
) -> Result<(Vec<Token>, Opdecls), ErrorGuaranteed> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut ops = Opdecls::new();
    let mut i = 0usize;

    while i < tokens.len() {
        let tok = tokens[i];
        if tok.kind == TokenKind::Ident && tok.spelling == symbols.kw_infix {
            i += 1;
            let precedence = expect_precedence(tokens, &mut i, interner, diags)?;
            let assoc = expect_assoc(tokens, &mut i, symbols, diags)?;
            let spelling = expect_spelling(tokens, &mut i, diags)?;
            if !ops.declare_infix(spelling, precedence, assoc) {
                return Err(diags.error(Diagnostic::duplicate_op_decl("infix", tok.span)));
            }
        } else if tok.kind == TokenKind::Ident && tok.spelling == symbols.kw_prefix {
            i += 1;
            let precedence = expect_precedence(tokens, &mut i, interner, diags)?;
            let spelling = expect_spelling(tokens, &mut i, diags)?;
            if !ops.declare_prefix(spelling, precedence) {
                return Err(diags.error(Diagnostic::duplicate_op_decl("prefix", tok.span)));
            }
        } else {
            out.push(tok);
            i += 1;
        }
    }

    Ok((out, ops))
}

fn expect_precedence(
    tokens: &[Token],
    i: &mut usize,
    interner: &Interner,
    diags: &mut Queue,
) -> Result<u8, ErrorGuaranteed> {
    let tok = tokens.get(*i).copied();
    match tok {
        Some(t) if t.kind == TokenKind::Number => {
            let text = interner.resolve(t.spelling);
            let value = text
                .parse::<u8>()
                .map_err(|_| diags.error(Diagnostic::op_decl("a precedence level 0..=255", t.span)))?;
            *i += 1;
            Ok(value)
        }
        Some(t) => Err(diags.error(Diagnostic::op_decl("a precedence level", t.span))),
        None => Err(diags.error(Diagnostic::op_decl(
            "a precedence level, found end of file",
            tokens.last().map_or_else(Default::default, |t| t.span),
        ))),
    }
}

fn expect_assoc(
    tokens: &[Token],
    i: &mut usize,
    symbols: &Symbols,
    diags: &mut Queue,
) -> Result<Assoc, ErrorGuaranteed> {
    let tok = tokens.get(*i).copied();
    match tok {
        Some(t) if t.spelling == symbols.assoc_left => {
            *i += 1;
            Ok(Assoc::Left)
        }
        Some(t) if t.spelling == symbols.assoc_right => {
            *i += 1;
            Ok(Assoc::Right)
        }
        Some(t) if t.spelling == symbols.assoc_none => {
            *i += 1;
            Ok(Assoc::None)
        }
        Some(t) => Err(diags.error(Diagnostic::op_decl(
            "an associativity (`left`, `right`, or `none`)",
            t.span,
        ))),
        None => Err(diags.error(Diagnostic::op_decl(
            "an associativity, found end of file",
            tokens.last().map_or_else(Default::default, |t| t.span),
        ))),
    }
}

fn expect_spelling(
    tokens: &[Token],
    i: &mut usize,
    diags: &mut Queue,
) -> Result<tara_ir::Name, ErrorGuaranteed> {
    let tok = tokens.get(*i).copied();
    match tok {
        Some(t) if !t.is_eof() => {
            *i += 1;
            Ok(t.spelling)
        }
        Some(t) => Err(diags.error(Diagnostic::op_decl("an operator spelling", t.span))),
        None => Err(diags.error(Diagnostic::op_decl(
            "an operator spelling, found end of file",
            tokens.last().map_or_else(Default::default, |t| t.span),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_diagnostic::Queue;
    use tara_ir::Symbols;

    #[test]
    fn declares_infix_operator_and_strips_declaration_from_buffer() {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let mut diags = Queue::new();
        let tokens = tara_lexer_for_tests::lex("infix 6 left + func", &interner, &mut diags);
        let (out, ops) = scan(&tokens, &interner, &symbols, &mut diags).unwrap();
        assert!(diags.is_empty());
        let plus = interner.intern("+");
        let info = ops.infix(plus).expect("infix + to be declared");
        assert_eq!(info.precedence, 6);
        assert_eq!(info.assoc, Assoc::Left);
        // The declaration itself is excised; only `func` and EOF remain.
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn duplicate_declaration_is_an_error() {
        let interner = Interner::new();
        let symbols = Symbols::new(&interner);
        let mut diags = Queue::new();
        let tokens =
            tara_lexer_for_tests::lex("infix 6 left + infix 7 right +", &interner, &mut diags);
        let result = scan(&tokens, &interner, &symbols, &mut diags);
        assert!(result.is_err());
    }

    /// A tiny stand-in lexer for scanner unit tests, avoiding a dev-dependency
    /// cycle back onto the full `tara_lexer` crate's own test fixtures.
    mod tara_lexer_for_tests {
        use tara_diagnostic::Queue;
        use tara_ir::{Interner, Token};

        pub fn lex(src: &str, interner: &Interner, diags: &mut Queue) -> Vec<Token> {
            tara_lexer::lex(src, interner, diags).expect("test input should lex cleanly")
        }
    }
}
