//! The untyped syntax tree produced by the parser (spec.md §3, §4.4) and
//! consumed by the type checker (§4.5).
//!
//! Every recursive payload is an [`Idx`]/[`Range`] into one of [`Ast`]'s two
//! arenas rather than a `Box`ed child, per this crate's "intern everything,
//! flatten everything" discipline (see `arena` module docs).

use crate::arena::{Arena, Idx, Range};
use crate::name::Name;
use crate::span::Span;
use crate::type_id::TypeId;

pub type ExprId = Idx<Expr>;
pub type ExprRange = Range<Expr>;
pub type BindingId = Idx<Binding>;
pub type BindingRange = Range<Binding>;

/// A parameter/`let`/`mut` pattern (spec.md §3 **Binding**).
#[derive(Clone, Debug)]
pub enum Binding {
    /// `()` — binds nothing; its type is unit.
    Empty,
    /// `NAME : type` — binds one name with a declared annotation.
    Name {
        name: Name,
        annot: TypeId,
        span: Span,
    },
    /// `(b1, b2, ...)` in left-to-right source order (GLOSSARY: **tuple
    /// order**).
    Tuple(BindingRange),
}

/// A single AST expression node: a tag plus the type slot the checker fills
/// in (spec.md §3: "carrying an interned `*Type`"). `ty` is [`TypeId::NONE`]
/// until type checking assigns it.
#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
    pub span: Span,
}

impl Expr {
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            ty: TypeId::NONE,
            span,
        }
    }
}

/// spec.md §3 **Expr** tags. Operator application (`x + y`, prefix `-x`) is
/// desugared by the parser into `Call` before the AST is built (§4.4:
/// "Operator application produces `Call{callee = Recall(opname), args =
/// Tuple[lhs, rhs]}`"), so there is no separate binary/unary-operator
/// variant here.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Unit,
    NumberLit(Name),
    StringLit(Name),
    BoolLit(bool),
    Recall(Name),
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    Loop {
        body: ExprId,
    },
    Bareblock(ExprRange),
    Call {
        callee: ExprId,
        args: ExprId,
    },
    Tuple(ExprRange),
    Let {
        bind: BindingId,
        init: ExprId,
    },
    Mut {
        bind: BindingId,
        init: ExprId,
    },
    Break {
        value: ExprId,
    },
    Return {
        value: ExprId,
    },
    Assign {
        name: Name,
        value: ExprId,
    },
    /// Expression-statement; its value is discarded.
    Const {
        expr: ExprId,
    },
}

/// spec.md §3 **Function**: `{name, args: Binding, ret: *Type, body: Expr}`.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Name,
    pub args: BindingId,
    pub ret: TypeId,
    pub body: ExprId,
    pub span: Span,
}

/// spec.md §3 **Ast**: "An ordered list of `Function`s," plus the arenas
/// that own every `Expr`/`Binding` reachable from those functions. Arenas
/// outlive the `Ast` itself is trivially true here since they're owned by
/// it; spec.md §5's "arenas released in reverse consumption order" is
/// satisfied by normal `Drop` order once conversion has produced a `Tst`
/// and no longer borrows from this `Ast`.
#[derive(Default)]
pub struct Ast {
    pub functions: Vec<Function>,
    pub exprs: Arena<Expr>,
    pub bindings: Arena<Binding>,
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            functions: Vec::new(),
            exprs: Arena::new(),
            bindings: Arena::new(),
        }
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        self.exprs.get(id)
    }

    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        self.exprs.get_mut(id)
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        self.bindings.get(id)
    }

    pub fn expr_range(&self, range: ExprRange) -> &[Expr] {
        self.exprs.slice(range)
    }

    pub fn binding_range(&self, range: BindingRange) -> &[Binding] {
        self.bindings.slice(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_of_empty_is_distinct_from_name() {
        let mut ast = Ast::new();
        let empty = ast.bindings.alloc(Binding::Empty);
        let name = ast.bindings.alloc(Binding::Name {
            name: Name::default(),
            annot: TypeId::NONE,
            span: Span::DUMMY,
        });
        assert_ne!(empty, name);
    }

    #[test]
    fn tuple_expr_preserves_element_order() {
        let mut ast = Ast::new();
        let a = ast.exprs.alloc(Expr::new(ExprKind::Unit, Span::DUMMY));
        let b = ast.exprs.alloc(Expr::new(ExprKind::BoolLit(true), Span::DUMMY));
        let range = ast.exprs.alloc_range([
            Expr::new(ExprKind::Recall(Name::default()), Span::DUMMY),
            Expr::new(ExprKind::BoolLit(false), Span::DUMMY),
        ]);
        // `a`/`b` allocated before the range; sanity-check the range itself
        // keeps the order it was built with.
        let _ = (a, b);
        assert!(matches!(ast.expr_range(range)[0].kind, ExprKind::Recall(_)));
        assert!(matches!(
            ast.expr_range(range)[1].kind,
            ExprKind::BoolLit(false)
        ));
    }
}
