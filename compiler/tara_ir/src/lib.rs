//! Shared contract types for the Tara compiler: interned names, source
//! spans, the lexer token contract, the type-id handle, and the arena-backed
//! AST. Every other `tara_*` crate depends on this one; it depends on none
//! of them.

pub mod arena;
pub mod ast;
pub mod interner;
pub mod name;
pub mod span;
pub mod token;
pub mod type_id;
pub mod well_known;

pub use arena::{Arena, Idx, Range};
pub use ast::{Ast, Binding, BindingId, BindingRange, Expr, ExprId, ExprKind, ExprRange, Function};
pub use interner::Interner;
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind};
pub use type_id::TypeId;
pub use well_known::Symbols;
