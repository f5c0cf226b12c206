//! A small `logos`-based tokenizer implementing the lexer contract spec.md
//! §6 describes but leaves unspecified ("consumed, not specified"): "a
//! stream of `Token{kind, spelling}`... EOF is sentinel-kinded."
//!
//! Not part of the specified core (§1 lists lexical classification as an
//! out-of-scope external collaborator), but the pipeline needs a concrete
//! implementation of the contract to run end-to-end, so this crate provides
//! one — kept deliberately small (SPEC_FULL.md §A).

use logos::Logos;

use tara_diagnostic::{Diagnostic, ErrorGuaranteed, Queue};
use tara_ir::{Interner, Span, Token, TokenKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
enum Lex {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token(":")]
    #[token(",")]
    #[token(";")]
    #[token("=")]
    #[token("->")]
    #[regex(r"[!#$%&*+./<>?@^|~-]+")]
    Punct,
}

/// Tokenizes `src`, interning every token's spelling through `interner`.
///
/// On an unrecognized byte sequence, queues a `Code::Lex` diagnostic and
/// returns `Err` — lexing aborts the whole stage rather than skipping the
/// bad byte and continuing (spec.md §7: "`Lex`/`Parse`/`OpDecl` abort their
/// stage (no recovery within stage)").
pub fn lex(src: &str, interner: &Interner, diags: &mut Queue) -> Result<Vec<Token>, ErrorGuaranteed> {
    let mut tokens = Vec::new();
    let mut lexer = Lex::lexer(src);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(kind) => {
                let spelling = interner.intern(lexer.slice());
                let kind = match kind {
                    Lex::Ident => TokenKind::Ident,
                    Lex::Number => TokenKind::Number,
                    Lex::Str => TokenKind::String,
                    Lex::Punct => TokenKind::Punct,
                };
                tokens.push(Token::new(kind, spelling, span));
            }
            Err(()) => {
                let spelling = lexer.slice();
                return Err(diags.error(Diagnostic::lex(spelling, span)));
            }
        }
    }

    let eof_spelling = interner.intern("");
    let eof_span = Span::point(u32::try_from(src.len()).unwrap_or(u32::MAX));
    tokens.push(Token::new(TokenKind::Eof, eof_spelling, eof_span));

    Ok(tokens)
}
