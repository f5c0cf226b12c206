//! AST → TST lowering (spec.md §4.6).
//!
//! Input is assumed well-typed (every `Expr.ty` already canonical); this
//! module performs no further type checks. A shape the type checker should
//! have rejected (an `Assign` to a name that doesn't resolve, say) is a
//! programmer error here, not a diagnosable one, and is reported via
//! `debug_assert!`/`expect` rather than `tara_diagnostic::Diagnostic`.

use rustc_hash::{FxHashMap, FxHashSet};

use tara_ir::{Ast, Binding, BindingRange, Expr, ExprId, ExprKind, ExprRange, Name};

use crate::tst::{Reference, Tst, TstExpr, TstExprId, TstExprKind, TstFunction};

/// Lowers every function in `ast` into a [`Tst`].
///
/// Per spec.md §4.6, the converter's only jobs are: resolve `Recall` names to
/// local slots or function references, flatten tuple-destructuring `Let`/
/// `Mut` into `StoreLocal`/`Project` sequences, turn statement-discarded
/// values into explicit `Discard` nodes, and assign each function a dense,
/// deterministic slot list (params first in left-to-right tuple order, then
/// locals in source order).
pub fn convert(ast: &Ast) -> Tst {
    let function_names: FxHashSet<Name> = ast.functions.iter().map(|f| f.name).collect();

    let mut tst = Tst::new();
    for f in &ast.functions {
        tracing::debug!(?f.name, "converting function");
        let mut lowerer = Lowerer {
            ast,
            functions: &function_names,
            tst: &mut tst,
            scopes: vec![FxHashMap::default()],
            next_slot: 0,
        };
        let body = lowerer.lower_function_body(f.args, f.body);
        let slot_count = lowerer.next_slot;
        tst.functions.push(TstFunction {
            name: f.name,
            slot_count,
            ret: f.ret,
            body,
            span: f.span,
        });
    }
    tst
}

struct Lowerer<'a> {
    ast: &'a Ast,
    functions: &'a FxHashSet<Name>,
    tst: &'a mut Tst,
    /// Name → slot, innermost scope last (mirrors `tara_typeck::env::Env`'s
    /// shadowing discipline, but slots are never reused: a shadowing
    /// redeclaration just gets the next slot).
    scopes: Vec<FxHashMap<Name, u32>>,
    next_slot: u32,
}

impl Lowerer<'_> {
    fn alloc_slot(&mut self) -> u32 {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    fn declare(&mut self, name: Name, slot: u32) {
        self.scopes
            .last_mut()
            .expect("at least one scope")
            .insert(name, slot);
    }

    fn resolve(&self, name: Name) -> Reference {
        for scope in self.scopes.iter().rev() {
            if let Some(&slot) = scope.get(&name) {
                return Reference::Local(slot);
            }
        }
        debug_assert!(
            self.functions.contains(&name),
            "Recall({name:?}) resolves to neither a local slot nor a function: \
             typecheck should have rejected this"
        );
        Reference::Function(name)
    }

    fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the outermost scope");
    }

    fn alloc(&mut self, kind: TstExprKind, expr: &Expr) -> TstExprId {
        self.tst.exprs.alloc(TstExpr {
            kind,
            ty: expr.ty,
            span: expr.span,
        })
    }

    /// Assigns one slot per leaf name in `binding`, left-to-right, then
    /// lowers `body` (spec.md §4.6: "parameters first, in left-to-right
    /// tuple order"). No `StoreLocal` is emitted for parameters — they
    /// arrive already materialized in their slots by calling convention,
    /// unlike a `Let`/`Mut` whose value must be computed and stored.
    fn lower_function_body(&mut self, args: tara_ir::BindingId, body: ExprId) -> TstExprId {
        self.declare_params(self.ast.binding(args).clone());
        self.lower_expr(body)
    }

    fn declare_params(&mut self, binding: Binding) {
        match binding {
            Binding::Empty => {}
            Binding::Name { name, .. } => {
                let slot = self.alloc_slot();
                self.declare(name, slot);
            }
            Binding::Tuple(range) => {
                for child in self.ast.binding_range(range).to_vec() {
                    self.declare_params(child);
                }
            }
        }
    }

    fn lower_expr(&mut self, id: ExprId) -> TstExprId {
        let expr = self.ast.expr(id).clone();
        match expr.kind.clone() {
            ExprKind::Unit => self.alloc(TstExprKind::Unit, &expr),
            ExprKind::NumberLit(n) => self.alloc(TstExprKind::NumberLit(n), &expr),
            ExprKind::StringLit(n) => self.alloc(TstExprKind::StringLit(n), &expr),
            ExprKind::BoolLit(b) => self.alloc(TstExprKind::BoolLit(b), &expr),
            ExprKind::Recall(name) => {
                let reference = self.resolve(name);
                self.alloc(TstExprKind::Recall(reference), &expr)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.lower_expr(cond);
                let then_branch = self.lower_expr(then_branch);
                let else_branch = self.lower_expr(else_branch);
                self.alloc(
                    TstExprKind::If {
                        cond,
                        then_branch,
                        else_branch,
                    },
                    &expr,
                )
            }
            ExprKind::Loop { body } => {
                let body = self.lower_expr(body);
                self.alloc(TstExprKind::Loop { body }, &expr)
            }
            ExprKind::Bareblock(range) => {
                self.push_scope();
                let stmts = self.lower_block_stmts(range);
                self.pop_scope();
                let items: Vec<TstExpr> = stmts.iter().map(|&id| self.tst.exprs.get(id).clone()).collect();
                let range = self.tst.exprs.alloc_range(items);
                self.alloc(TstExprKind::Block(range), &expr)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.lower_expr(callee);
                let args = self.lower_expr(args);
                self.alloc(TstExprKind::Call { callee, args }, &expr)
            }
            ExprKind::Tuple(range) => {
                let elems: Vec<TstExprId> =
                    range.iter().map(|child| self.lower_expr(child)).collect();
                let items: Vec<TstExpr> = elems.iter().map(|&id| self.tst.exprs.get(id).clone()).collect();
                let range = self.tst.exprs.alloc_range(items);
                self.alloc(TstExprKind::Tuple(range), &expr)
            }
            ExprKind::Break { value } => {
                let value = self.lower_expr(value);
                self.alloc(TstExprKind::Break { value }, &expr)
            }
            ExprKind::Return { value } => {
                let value = self.lower_expr(value);
                self.alloc(TstExprKind::Return { value }, &expr)
            }
            ExprKind::Assign { name, value } => {
                let value = self.lower_expr(value);
                let slot = match self.resolve(name) {
                    Reference::Local(slot) => slot,
                    Reference::Function(_) => {
                        unreachable!(
                            "Assign to a function name should have been rejected by typecheck"
                        )
                    }
                };
                self.alloc(TstExprKind::Assign { slot, value }, &expr)
            }
            // `Let`/`Mut`/`Const` only ever occur in statement position
            // inside a `Bareblock`; `lower_block_stmts` handles them
            // directly and never calls into `lower_expr` for one of these
            // kinds. A bare function body that is itself one of these
            // (e.g. `func f(): unit let x: int = 1;`) cannot be produced by
            // the parser (`parse_stmt` always wraps these in a block via
            // `;`-termination) so this arm is unreachable for well-formed
            // input.
            ExprKind::Let { .. } | ExprKind::Mut { .. } | ExprKind::Const { .. } => {
                unreachable!("statement-only expression kind reached lower_expr directly")
            }
        }
    }

    /// Lowers a `Bareblock`'s statement list. Most `ExprKind`s map one ast
    /// node to one tst node; `Let`/`Mut` can expand to several (a
    /// `StoreLocal` per bound leaf name plus a `Project` per tuple level),
    /// and `Const` becomes a `Discard`.
    fn lower_block_stmts(&mut self, range: ExprRange) -> Vec<TstExprId> {
        let mut out = Vec::with_capacity(range.len());
        for child in range.iter() {
            let child_expr = self.ast.expr(child).clone();
            match child_expr.kind {
                ExprKind::Let { bind, init } => {
                    self.lower_binding_stmt(bind, init, &child_expr, &mut out);
                }
                ExprKind::Mut { bind, init } => {
                    self.lower_binding_stmt(bind, init, &child_expr, &mut out);
                }
                ExprKind::Const { expr: inner } => {
                    let inner_id = self.lower_expr(inner);
                    out.push(self.alloc(TstExprKind::Discard { expr: inner_id }, &child_expr));
                }
                _ => out.push(self.lower_expr(child)),
            }
        }
        out
    }

    /// Lowers one `Let`/`Mut` statement into its `StoreLocal`/`Project`
    /// expansion (spec.md §4.6: "Flatten tuple destructuring in `Let`/`Mut`
    /// into a sequence of single-name bindings plus projections"), pushing
    /// every emitted statement onto `out` in evaluation order.
    fn lower_binding_stmt(
        &mut self,
        bind: tara_ir::BindingId,
        init: ExprId,
        stmt_expr: &Expr,
        out: &mut Vec<TstExprId>,
    ) {
        let init_tst = self.lower_expr(init);
        let binding = self.ast.binding(bind).clone();
        match binding {
            Binding::Empty => {
                // No name to bind; still evaluate `init` for its effects
                // and discard the (unit-typed) result.
                out.push(self.alloc(TstExprKind::Discard { expr: init_tst }, stmt_expr));
            }
            Binding::Name { name, .. } => {
                let slot = self.alloc_slot();
                self.declare(name, slot);
                out.push(self.alloc(
                    TstExprKind::StoreLocal {
                        slot,
                        init: init_tst,
                    },
                    stmt_expr,
                ));
            }
            Binding::Tuple(range) => {
                let tmp_slot = self.alloc_slot();
                out.push(self.alloc(
                    TstExprKind::StoreLocal {
                        slot: tmp_slot,
                        init: init_tst,
                    },
                    stmt_expr,
                ));
                let tmp_recall = self.alloc(
                    TstExprKind::Recall(Reference::Local(tmp_slot)),
                    stmt_expr,
                );
                self.flatten_tuple_binding(range, tmp_recall, stmt_expr, out);
            }
        }
    }

    /// Recursively projects each leaf of a tuple binding out of
    /// `parent_value` (itself always a cheap `Recall(Local(_))`, per
    /// `lower_binding_stmt`, never the original initializer expression —
    /// so a value with side effects is evaluated exactly once).
    fn flatten_tuple_binding(
        &mut self,
        range: BindingRange,
        parent_value: TstExprId,
        span_source: &Expr,
        out: &mut Vec<TstExprId>,
    ) {
        for (index, child) in self.ast.binding_range(range).to_vec().into_iter().enumerate() {
            let index = u32::try_from(index).expect("binding arity fits u32");
            match child {
                Binding::Empty => {}
                Binding::Name { name, .. } => {
                    let proj = self.alloc(
                        TstExprKind::Project {
                            tuple: parent_value,
                            index,
                        },
                        span_source,
                    );
                    let slot = self.alloc_slot();
                    self.declare(name, slot);
                    out.push(self.alloc(TstExprKind::StoreLocal { slot, init: proj }, span_source));
                }
                Binding::Tuple(sub_range) => {
                    let proj = self.alloc(
                        TstExprKind::Project {
                            tuple: parent_value,
                            index,
                        },
                        span_source,
                    );
                    let tmp_slot = self.alloc_slot();
                    out.push(self.alloc(
                        TstExprKind::StoreLocal {
                            slot: tmp_slot,
                            init: proj,
                        },
                        span_source,
                    ));
                    let tmp_recall = self.alloc(
                        TstExprKind::Recall(Reference::Local(tmp_slot)),
                        span_source,
                    );
                    self.flatten_tuple_binding(sub_range, tmp_recall, span_source, out);
                }
            }
        }
    }
}
