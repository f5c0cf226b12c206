//! The lexer contract (spec.md §6): "a stream of `Token{kind, spelling}`
//! where `spelling` is an interned pointer; EOF is sentinel-kinded."
//!
//! This type is defined here, not in `tara_lexer`, so that `tara_parse` and
//! `tara_parse`'s operator scanner can depend on the contract without
//! depending on a concrete lexer implementation.

use crate::name::Name;
use crate::span::Span;

/// Lexical classification of a [`Token`]. Punctuation and keyword tokens
/// carry their distinguishing spelling in `Token::spelling` rather than in
/// extra `TokenKind` variants, matching the "kind + spelling" contract.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// An identifier, keyword, or operator spelling — distinguished by the
    /// interned text in `spelling`, not by this tag.
    Ident,
    Number,
    String,
    /// Single- or multi-character punctuation/operator glyph (`(`, `)`,
    /// `:`, `,`, `;`, `{`, `}`, `->`, or a user-declared operator spelling).
    Punct,
    Eof,
}

/// One lexical token: a classification plus its interned text and source
/// span. `spelling` is meaningless for `Eof` (interned empty string).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: Name,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, spelling: Name, span: Span) -> Self {
        Token {
            kind,
            spelling,
            span,
        }
    }

    #[inline]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
