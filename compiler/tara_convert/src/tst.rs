//! The Typed Syntax Tree (spec.md §3 **Tst**, GLOSSARY "TST"): the
//! post-conversion form that mirrors `Ast` but with names replaced by dense
//! slot indices into per-function environments and every node's already-
//! checked type copied alongside it.

use tara_ir::{Arena, Idx, Name, Range, Span, TypeId};

pub type TstExprId = Idx<TstExpr>;
pub type TstExprRange = Range<TstExpr>;

/// What a lowered `Recall` resolves to (spec.md §4.6: "Replace every
/// `Recall(name)` with either a local-slot index or a function reference").
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Reference {
    Local(u32),
    Function(Name),
}

/// One TST node: the converter's analogue of `tara_ir::Expr`, carrying the
/// same already-checked `TypeId` instead of recomputing it.
#[derive(Clone, Debug)]
pub struct TstExpr {
    pub kind: TstExprKind,
    pub ty: TypeId,
    pub span: Span,
}

/// Mirrors `tara_ir::ExprKind` node-for-node except where spec.md §4.6 asks
/// for desugaring: `Recall` carries a resolved [`Reference`] instead of a
/// bare `Name`; `Let`/`Mut` disappear entirely, replaced at the enclosing
/// block by the `StoreLocal`/`Project` sequence their destructuring expands
/// to; `Const` becomes `Discard` (spec.md: "a non-trailing expression whose
/// value is used produces a `Const`" — renamed here since `Const` already
/// names an AST-level statement form, and this node's job is purely to
/// discard a value, not bind one).
#[derive(Clone, Debug)]
pub enum TstExprKind {
    Unit,
    NumberLit(Name),
    StringLit(Name),
    BoolLit(bool),
    Recall(Reference),
    If {
        cond: TstExprId,
        then_branch: TstExprId,
        else_branch: TstExprId,
    },
    Loop {
        body: TstExprId,
    },
    Block(TstExprRange),
    Call {
        callee: TstExprId,
        args: TstExprId,
    },
    Tuple(TstExprRange),
    /// Binds `init`'s value into `slot`. The flattened form of `Let`/`Mut`
    /// (spec.md §4.6); produced one-per-bound-name, in source order, with
    /// an extra synthetic slot per nested tuple level to avoid
    /// re-evaluating a destructured value's source expression more than
    /// once.
    StoreLocal {
        slot: u32,
        init: TstExprId,
    },
    /// Extracts element `index` from a tuple value. Always applied to a
    /// cheap `Recall(Local(_))` operand, never directly to the original
    /// initializer, so a value with side effects is only ever evaluated by
    /// the `StoreLocal` that first materializes it.
    Project {
        tuple: TstExprId,
        index: u32,
    },
    Break {
        value: TstExprId,
    },
    Return {
        value: TstExprId,
    },
    Assign {
        slot: u32,
        value: TstExprId,
    },
    /// A statement whose value is computed and thrown away.
    Discard {
        expr: TstExprId,
    },
}

/// spec.md §4.6: "Assign each function a deterministic list of local slots
/// (parameters first, in left-to-right tuple order; then locals in source
/// order)". `slot_count` is the total number of slots a caller of the code
/// generator must reserve storage for.
#[derive(Clone, Debug)]
pub struct TstFunction {
    pub name: Name,
    pub slot_count: u32,
    pub ret: TypeId,
    pub body: TstExprId,
    pub span: Span,
}

/// spec.md §3 **Tst**: "Post-conversion form mirroring `Ast`". One arena for
/// every `TstExpr` reachable from `functions`, owned for the remainder of
/// the pipeline (spec.md §5: "`Tst` nodes in the converter's arena").
#[derive(Default)]
pub struct Tst {
    pub functions: Vec<TstFunction>,
    pub exprs: Arena<TstExpr>,
}

impl Tst {
    pub fn new() -> Self {
        Tst {
            functions: Vec::new(),
            exprs: Arena::new(),
        }
    }

    pub fn expr(&self, id: TstExprId) -> &TstExpr {
        self.exprs.get(id)
    }

    pub fn expr_range(&self, range: TstExprRange) -> &[TstExpr] {
        self.exprs.slice(range)
    }
}
